//! Run one scraper over saved ffmpeg output.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use devscan_catalog_model::{DeviceOptions, DeviceRecord};
use devscan_scrape_core::{parse_audio_options, parse_video_options, scan_listing, LinePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParseTarget {
    /// `-list_devices true` output
    Listing,
    /// `-list_options true` output of an audio device
    Audio,
    /// `-list_options true` output of a video device
    Video,
}

#[derive(Serialize)]
struct ListingSummary {
    devices: Vec<DeviceRecord>,
    rejected: Vec<RejectedSummary>,
}

#[derive(Serialize)]
struct RejectedSummary {
    line: usize,
    reason: String,
}

pub fn run(what: ParseTarget, file: PathBuf, lenient: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", file.display()))?;
    let policy = LinePolicy::from_strict(!lenient);

    let json = match what {
        ParseTarget::Listing => {
            let scan = scan_listing(&text);
            let summary = ListingSummary {
                devices: scan.records(),
                rejected: scan
                    .rejected
                    .into_iter()
                    .map(|r| RejectedSummary {
                        line: r.line,
                        reason: r.reason,
                    })
                    .collect(),
            };
            serde_json::to_string_pretty(&summary)?
        }
        ParseTarget::Audio => {
            let options = parse_audio_options(&text, policy)?;
            serde_json::to_string_pretty(&DeviceOptions::audio(options))?
        }
        ParseTarget::Video => {
            let options = parse_video_options(&text, policy)?;
            serde_json::to_string_pretty(&DeviceOptions::video(options))?
        }
    };

    println!("{json}");
    Ok(())
}
