//! The assembled device catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::options::{AudioOption, VideoOption};

/// Stand-in for a device's options when probing it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "error")]
    pub message: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capability options of one device, or the reason they are missing.
///
/// An empty `Audio`/`Video` map is a successful probe that listed nothing
/// (e.g. a virtual camera); only `Failed` means the probe itself broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceOptions {
    Audio(BTreeMap<usize, AudioOption>),
    Video(BTreeMap<usize, VideoOption>),
    Failed(ErrorRecord),
}

impl DeviceOptions {
    /// Index audio options in the order they were parsed.
    pub fn audio(options: Vec<AudioOption>) -> Self {
        Self::Audio(options.into_iter().enumerate().collect())
    }

    /// Index video options in the order they were parsed.
    pub fn video(options: Vec<VideoOption>) -> Self {
        Self::Video(options.into_iter().enumerate().collect())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(ErrorRecord::new(message))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Failed(record) => Some(record),
            _ => None,
        }
    }

    /// Number of options; zero for failed devices.
    pub fn len(&self) -> usize {
        match self {
            Self::Audio(map) => map.len(),
            Self::Video(map) => map.len(),
            Self::Failed(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One catalog slot: the device plus whatever its probe produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceEntry {
    pub name: String,
    pub alternative_name: String,
    pub options: DeviceOptions,
}

/// Devices grouped by kind, each group indexed densely from zero in
/// listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceCatalog {
    pub audio: BTreeMap<usize, DeviceEntry>,
    pub video: BTreeMap<usize, DeviceEntry>,
}

impl DeviceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self, kind: DeviceKind) -> &BTreeMap<usize, DeviceEntry> {
        match kind {
            DeviceKind::Audio => &self.audio,
            DeviceKind::Video => &self.video,
        }
    }

    /// Append an entry under the next free index of its kind and return
    /// that index.
    pub fn push(&mut self, kind: DeviceKind, entry: DeviceEntry) -> usize {
        let group = match kind {
            DeviceKind::Audio => &mut self.audio,
            DeviceKind::Video => &mut self.video,
        };
        let index = group.len();
        group.insert(index, entry);
        index
    }

    /// Total number of devices across both kinds.
    pub fn len(&self) -> usize {
        self.audio.len() + self.video.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries whose probe failed, with their kind and index.
    pub fn failures(&self) -> impl Iterator<Item = (DeviceKind, usize, &DeviceEntry)> {
        self.iter()
            .filter(|(_, _, entry)| entry.options.is_failed())
    }

    /// All entries, audio first, each kind in index order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceKind, usize, &DeviceEntry)> {
        let audio = self
            .audio
            .iter()
            .map(|(idx, entry)| (DeviceKind::Audio, *idx, entry));
        let video = self
            .video
            .iter()
            .map(|(idx, entry)| (DeviceKind::Video, *idx, entry));
        audio.chain(video)
    }

    /// First entry of the given kind with this display name.
    pub fn find(&self, kind: DeviceKind, name: &str) -> Option<&DeviceEntry> {
        self.kind(kind).values().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, options: DeviceOptions) -> DeviceEntry {
        DeviceEntry {
            name: name.to_string(),
            alternative_name: format!("@device_{name}"),
            options,
        }
    }

    #[test]
    fn push_assigns_dense_indices_per_kind() {
        let mut catalog = DeviceCatalog::new();
        assert_eq!(catalog.push(DeviceKind::Video, entry("cam", DeviceOptions::video(vec![]))), 0);
        assert_eq!(catalog.push(DeviceKind::Audio, entry("mic", DeviceOptions::audio(vec![]))), 0);
        assert_eq!(catalog.push(DeviceKind::Video, entry("obs", DeviceOptions::failed("boom"))), 1);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.video[&1].name, "obs");
        assert_eq!(catalog.failures().count(), 1);
        assert!(catalog.find(DeviceKind::Audio, "mic").is_some());
        assert!(catalog.find(DeviceKind::Video, "mic").is_none());
    }

    #[test]
    fn empty_options_and_failure_serialize_differently() {
        let mut catalog = DeviceCatalog::new();
        catalog.push(DeviceKind::Video, entry("virtual", DeviceOptions::video(vec![])));
        catalog.push(DeviceKind::Video, entry("broken", DeviceOptions::failed("no such device")));
        catalog.push(
            DeviceKind::Audio,
            entry("mic", DeviceOptions::audio(vec![AudioOption::new(1, 16, 8000)])),
        );

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            value,
            json!({
                "audio": {
                    "0": {
                        "name": "mic",
                        "alternative_name": "@device_mic",
                        "options": { "0": { "ch": 1, "bits": 16, "rate": 8000 } }
                    }
                },
                "video": {
                    "0": { "name": "virtual", "alternative_name": "@device_virtual", "options": {} },
                    "1": {
                        "name": "broken",
                        "alternative_name": "@device_broken",
                        "options": { "error": "no such device" }
                    }
                }
            })
        );
    }
}
