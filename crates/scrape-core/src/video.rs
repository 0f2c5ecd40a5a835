//! Video capability lines.
//!
//! ffmpeg's dshow backend prints one line per capture mode:
//!
//! ```text
//! pixel_format=yuyv422  min s=640x480 fps=30 max s=640x480 fps=30 (tv, bt470bg/bt709/unknown, topleft)
//! vcodec=mjpeg  min s=1280x720 fps=5 max s=1280x720 fps=30 (pc, bt470bg/bt709/unknown, center)
//! ```
//!
//! `fps` appears twice (minimum, then maximum); the last one is kept.

use devscan_catalog_model::{FrameRate, VideoFormat, VideoOption};
use devscan_common::error::DevscanResult;

use crate::classify::{scrape_lines, Classified, LinePolicy, LineRule};

/// Whitespace-separated fields considered per line; the last one keeps the
/// rest of the line.
const MAX_FIELDS: usize = 6;

/// Decode one tag-stripped video line.
pub fn parse_video_line(remainder: &str) -> Classified<VideoOption> {
    let normalized = remainder.replace("max s", "max_s").replace("min s", "min_s");

    let mut pixel_format = None;
    let mut codec = None;
    let mut min_size = None;
    let mut max_size = None;
    let mut fps = None;
    let mut info = None;

    let mut rest = normalized.trim();
    let mut taken = 0;
    while !rest.is_empty() {
        taken += 1;
        let (field, tail) = if taken == MAX_FIELDS {
            (rest, "")
        } else {
            match rest.find(char::is_whitespace) {
                Some(end) => (&rest[..end], rest[end..].trim_start()),
                None => (rest, ""),
            }
        };

        if !field.contains('=') {
            info = Some(rest.to_string());
            break;
        }

        let mut parts = field.split('=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default().trim_end_matches(',');
        if parts.next().is_some() {
            return Classified::Malformed(format!("video field `{field}` has more than one `=`"));
        }

        match key {
            "pixel_format" => pixel_format = Some(value.to_string()),
            "vcodec" => codec = Some(value.to_string()),
            "min_s" => min_size = Some(value.to_string()),
            "max_s" => max_size = Some(value.to_string()),
            "fps" => fps = Some(value),
            _ => {}
        }

        rest = tail;
    }

    let format = match (pixel_format, codec) {
        (Some(pix), None) => VideoFormat::PixelFormat(pix),
        (None, Some(codec)) => VideoFormat::Codec(codec),
        (Some(_), Some(_)) => {
            return Classified::Malformed("both pixel_format and vcodec present".to_string())
        }
        (None, None) => {
            return Classified::Malformed("neither pixel_format nor vcodec present".to_string())
        }
    };

    let Some(fps) = fps else {
        return Classified::Malformed("missing fps".to_string());
    };
    let Some(fps) = fps.parse::<f64>().ok().and_then(FrameRate::from_f64) else {
        return Classified::Malformed(format!("fps `{fps}` is not a finite number"));
    };

    let (Some(min_size), Some(max_size)) = (min_size, max_size) else {
        return Classified::Malformed("missing min_s or max_s".to_string());
    };

    Classified::Matched(VideoOption {
        format,
        min_size,
        max_size,
        fps,
        info,
    })
}

/// Decode every video option in a probe's diagnostic text, in output order.
///
/// A device without configurable modes (e.g. a virtual camera) yields an
/// empty list, not an error.
pub fn parse_video_options(text: &str, policy: LinePolicy) -> DevscanResult<Vec<VideoOption>> {
    scrape_lines(text, LineRule::AssignmentWithGroup, policy, parse_video_line)
}
