//! Capability options recovered from probe output.

use serde::{Deserialize, Serialize};

/// One audio capture format.
///
/// The tool prints three numbers per line; they are stored positionally and
/// their labels are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioOption {
    #[serde(rename = "ch")]
    pub channel_count: u32,

    #[serde(rename = "bits")]
    pub bit_depth: u32,

    #[serde(rename = "rate")]
    pub sample_rate_hz: u32,
}

impl AudioOption {
    pub fn new(channel_count: u32, bit_depth: u32, sample_rate_hz: u32) -> Self {
        Self {
            channel_count,
            bit_depth,
            sample_rate_hz,
        }
    }
}

/// How video frames are delivered: raw pixels or a compressed stream.
/// The tool reports exactly one of the two per capture mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoFormat {
    #[serde(rename = "pixel_format")]
    PixelFormat(String),
    #[serde(rename = "vcodec")]
    Codec(String),
}

/// Frame rate as printed by the tool.
///
/// Integral values collapse to integers so `30.000000` reads back as `30`;
/// anything else (e.g. `7.5`) keeps its fractional value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameRate {
    Integral(i64),
    Fractional(f64),
}

impl FrameRate {
    /// Coerce a parsed float. Returns `None` for NaN or infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(Self::Integral(value as i64))
        } else {
            Some(Self::Fractional(value))
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integral(v) => v as f64,
            Self::Fractional(v) => v,
        }
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integral(v) => write!(f, "{v}"),
            Self::Fractional(v) => write!(f, "{v}"),
        }
    }
}

/// One video capture mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoOption {
    #[serde(flatten)]
    pub format: VideoFormat,

    /// Smallest frame size, literal `WxH` text.
    #[serde(rename = "min_s")]
    pub min_size: String,

    /// Largest frame size, literal `WxH` text.
    #[serde(rename = "max_s")]
    pub max_size: String,

    pub fps: FrameRate,

    /// Free-text trailer, usually `(range, colorspace, chroma location)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl VideoOption {
    pub fn pixel_format(&self) -> Option<&str> {
        match &self.format {
            VideoFormat::PixelFormat(fmt) => Some(fmt),
            VideoFormat::Codec(_) => None,
        }
    }

    pub fn video_codec(&self) -> Option<&str> {
        match &self.format {
            VideoFormat::Codec(codec) => Some(codec),
            VideoFormat::PixelFormat(_) => None,
        }
    }
}
