//! Devices discovered by the listing pass.

use serde::{Deserialize, Serialize};

/// Capture device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Audio,
    Video,
}

impl DeviceKind {
    /// Label used by the tool, both in listing descriptors and as the
    /// `audio=`/`video=` input selector prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Resolve a single descriptor word such as `video` or ` audio `.
    pub fn from_descriptor_word(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One device found in the listing output.
///
/// Created once per listing pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Human-readable name (the first quoted string of the block).
    pub display_name: String,

    /// Opaque token the tool needs to address this device in a probe call.
    /// Passed through byte-for-byte, braces and backslashes included.
    pub alternative_name: String,

    /// Which probe/parser applies.
    pub kind: DeviceKind,
}

impl DeviceRecord {
    pub fn new(
        display_name: impl Into<String>,
        alternative_name: impl Into<String>,
        kind: DeviceKind,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            alternative_name: alternative_name.into(),
            kind,
        }
    }

    /// The `-i` argument selecting this device, e.g. `video=@device_pnp_...`.
    pub fn input_selector(&self) -> String {
        format!("{}={}", self.kind.as_str(), self.alternative_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_words_are_case_and_space_tolerant() {
        assert_eq!(DeviceKind::from_descriptor_word(" Video"), Some(DeviceKind::Video));
        assert_eq!(DeviceKind::from_descriptor_word("audio "), Some(DeviceKind::Audio));
        assert_eq!(DeviceKind::from_descriptor_word("none"), None);
    }

    #[test]
    fn input_selector_keeps_alternative_name_verbatim() {
        let device = DeviceRecord::new(
            "Logi Capture",
            r"@device_sw_{860BB310-5D01-11D0-BD3B-00A0C911CE86}\{4A2FEA90-B0A0-438E-8BC3-D84157660D0A}",
            DeviceKind::Video,
        );
        assert_eq!(
            device.input_selector(),
            r"video=@device_sw_{860BB310-5D01-11D0-BD3B-00A0C911CE86}\{4A2FEA90-B0A0-438E-8BC3-D84157660D0A}"
        );
    }
}
