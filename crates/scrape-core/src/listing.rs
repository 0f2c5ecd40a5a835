//! Device block extraction from `-list_devices true` output.
//!
//! A block is a header naming the device and its kind, followed (possibly
//! several lines later) by the line carrying its alternative name:
//!
//! ```text
//! [dshow @ 000001f0c2a8e6c0] "HD Pro Webcam C920" (video)
//! [dshow @ 000001f0c2a8e6c0]   Alternative name "@device_pnp_\\?\usb#vid_046d&pid_0892..."
//! ```

use std::sync::OnceLock;

use devscan_catalog_model::{DeviceKind, DeviceRecord};
use regex::Regex;

use crate::classify::{normalize_newlines, Classified};

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\[[^\]]+\]\s*"(?P<name>[^"]+)"\s*\((?P<descriptor>[^)]*)\)\s*$"#)
            .expect("header pattern is valid")
    })
}

fn alternative_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"Alternative name\s+"(?P<token>.+)""#)
            .expect("alternative name pattern is valid")
    })
}

/// One complete device block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBlock {
    pub display_name: String,
    /// Kinds named by the descriptor, in descriptor order. A capture card
    /// reported as `(audio, video)` carries both.
    pub kinds: Vec<DeviceKind>,
    pub alternative_name: String,
    /// 1-based line of the block header.
    pub line: usize,
}

impl DeviceBlock {
    /// One record per kind this block advertises.
    pub fn records(&self) -> impl Iterator<Item = DeviceRecord> + '_ {
        self.kinds.iter().map(move |kind| {
            DeviceRecord::new(&self.display_name, &self.alternative_name, *kind)
        })
    }
}

/// A header that could not be turned into a device block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBlock {
    /// 1-based line of the offending header.
    pub line: usize,
    pub reason: String,
}

/// Everything found in one listing text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingScan {
    pub blocks: Vec<DeviceBlock>,
    pub rejected: Vec<RejectedBlock>,
}

impl ListingScan {
    /// Device records in source order.
    pub fn records(&self) -> Vec<DeviceRecord> {
        self.blocks.iter().flat_map(|block| block.records()).collect()
    }
}

struct Header {
    name: String,
    kinds: Vec<DeviceKind>,
}

fn parse_header(line: &str) -> Classified<Header> {
    let Some(caps) = header_re().captures(line) else {
        return Classified::Skipped;
    };

    let descriptor = &caps["descriptor"];
    let mut kinds = Vec::new();
    for kind in descriptor.split(',').filter_map(DeviceKind::from_descriptor_word) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        return Classified::Malformed(format!(
            "device \"{}\" has descriptor ({descriptor}) naming no audio or video kind",
            &caps["name"]
        ));
    }

    Classified::Matched(Header {
        name: caps["name"].to_string(),
        kinds,
    })
}

/// Scan listing output for device blocks, keeping track of headers that
/// never completed.
pub fn scan_listing(text: &str) -> ListingScan {
    let text = normalize_newlines(text);
    let mut scan = ListingScan::default();
    let mut pending: Option<(usize, Header)> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        match parse_header(line) {
            Classified::Matched(header) => {
                if let Some((at, stale)) = pending.replace((line_no, header)) {
                    scan.rejected.push(unterminated(at, &stale.name));
                }
                continue;
            }
            Classified::Malformed(reason) => {
                if let Some((at, stale)) = pending.take() {
                    scan.rejected.push(unterminated(at, &stale.name));
                }
                scan.rejected.push(RejectedBlock {
                    line: line_no,
                    reason,
                });
                continue;
            }
            Classified::Skipped => {}
        }

        let Some(caps) = alternative_name_re().captures(line) else {
            continue;
        };
        // An alternative name with no open header is noise.
        if let Some((at, header)) = pending.take() {
            scan.blocks.push(DeviceBlock {
                display_name: header.name,
                kinds: header.kinds,
                alternative_name: caps["token"].to_string(),
                line: at,
            });
        }
    }

    if let Some((at, stale)) = pending {
        scan.rejected.push(unterminated(at, &stale.name));
    }

    for rejected in &scan.rejected {
        tracing::debug!(line = rejected.line, reason = %rejected.reason, "Skipping device block");
    }

    scan
}

fn unterminated(line: usize, name: &str) -> RejectedBlock {
    RejectedBlock {
        line,
        reason: format!("device \"{name}\" has no alternative name line"),
    }
}

/// Device records in the order the listing printed them.
pub fn extract_devices(text: &str) -> Vec<DeviceRecord> {
    scan_listing(text).records()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
ffmpeg version 6.1-full_build-www.gyan.dev Copyright (c) 2000-2023 the FFmpeg developers\r
  libavdevice    60.  3.100 / 60.  3.100\r
[dshow @ 000001f0c2a8e6c0] \"HD Pro Webcam C920\" (video)\r
[dshow @ 000001f0c2a8e6c0]   Alternative name \"@device_pnp_\\\\?\\usb#vid_046d&pid_0892&mi_00#8&222f6f15&0&0000#{65e8773d-8f56-11d0-a3b9-00a0c9223196}\\global\"\r
[dshow @ 000001f0c2a8e6c0] \"Microphone (2- USB Advanced Audio Device)\" (audio)\r
[dshow @ 000001f0c2a8e6c0]   Alternative name \"@device_cm_{33D9A762-90C8-11D0-BD43-00A0C911CE86}\\wave_{FC0D8211-5530-4CC1-8B8D-14AC7C65BED9}\"\r
[dshow @ 000001f0c2a8e6c0] \"OBS Virtual Camera\" (video)\r
[dshow @ 000001f0c2a8e6c0]   Alternative name \"@device_sw_{860BB310-5D01-11D0-BD3B-00A0C911CE86}\\{A3FCE0F5-3493-419F-958A-ABA1250EC20B}\"\r
[in#0 @ 000001f0c2a8e500] Error opening input: Immediate exit requested\r
Error opening input file dummy.\r
";

    #[test]
    fn extracts_devices_in_source_order() {
        let devices = extract_devices(LISTING);
        let summary: Vec<_> = devices
            .iter()
            .map(|d| (d.display_name.as_str(), d.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("HD Pro Webcam C920", DeviceKind::Video),
                ("Microphone (2- USB Advanced Audio Device)", DeviceKind::Audio),
                ("OBS Virtual Camera", DeviceKind::Video),
            ]
        );
    }

    #[test]
    fn alternative_name_is_verbatim() {
        let devices = extract_devices(LISTING);
        assert_eq!(
            devices[0].alternative_name,
            r"@device_pnp_\\?\usb#vid_046d&pid_0892&mi_00#8&222f6f15&0&0000#{65e8773d-8f56-11d0-a3b9-00a0c9223196}\global"
        );
        assert_eq!(
            devices[1].alternative_name,
            r"@device_cm_{33D9A762-90C8-11D0-BD43-00A0C911CE86}\wave_{FC0D8211-5530-4CC1-8B8D-14AC7C65BED9}"
        );
    }

    #[test]
    fn block_may_span_noise_lines() {
        let text = "\
[dshow @ 0] \"Cam\" (video)
[dshow @ 0] some unrelated chatter
[dshow @ 0]   Alternative name \"@device_cam\"
";
        let scan = scan_listing(text);
        assert_eq!(scan.blocks.len(), 1);
        assert_eq!(scan.blocks[0].alternative_name, "@device_cam");
        assert_eq!(scan.blocks[0].line, 1);
        assert!(scan.rejected.is_empty());
    }

    #[test]
    fn incomplete_and_unknown_blocks_are_rejected_not_fatal() {
        let text = "\
[dshow @ 0] \"Orphan\" (video)
[dshow @ 0] \"Mystery\" (none)
[dshow @ 0]   Alternative name \"@device_mystery\"
[dshow @ 0] \"Mic\" (audio)
[dshow @ 0]   Alternative name \"@device_mic\"
[dshow @ 0]   Alternative name \"@device_stray\"
[dshow @ 0] \"Truncated\" (audio)
";
        let scan = scan_listing(text);
        assert_eq!(scan.records(), vec![DeviceRecord::new("Mic", "@device_mic", DeviceKind::Audio)]);
        let lines: Vec<_> = scan.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 7]);
    }

    #[test]
    fn combined_descriptor_yields_one_record_per_kind() {
        let text = "\
[dshow @ 0] \"Capture Card\" (audio, video)
[dshow @ 0]   Alternative name \"@device_card\"
";
        let devices = extract_devices(text);
        assert_eq!(
            devices,
            vec![
                DeviceRecord::new("Capture Card", "@device_card", DeviceKind::Audio),
                DeviceRecord::new("Capture Card", "@device_card", DeviceKind::Video),
            ]
        );
    }

    #[test]
    fn no_blocks_means_no_devices() {
        assert!(extract_devices("ffmpeg version 6.1\nError opening input file dummy.\n").is_empty());
    }
}
