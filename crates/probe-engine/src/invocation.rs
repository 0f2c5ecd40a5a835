//! Argument shapes for the tool's listing and probe modes.
//!
//! Argument order matters to ffmpeg: `-list_*` and `-f` are input options
//! and must precede `-i`.

use devscan_catalog_model::DeviceRecord;

/// `-list_devices true -f <backend> -i dummy`
pub fn listing_args(backend: &str) -> Vec<String> {
    vec![
        "-list_devices".to_string(),
        "true".to_string(),
        "-f".to_string(),
        backend.to_string(),
        "-i".to_string(),
        "dummy".to_string(),
    ]
}

/// `-list_options true -f <backend> -i <kind>=<alternative name>`
pub fn probe_args(backend: &str, device: &DeviceRecord) -> Vec<String> {
    vec![
        "-list_options".to_string(),
        "true".to_string(),
        "-f".to_string(),
        backend.to_string(),
        "-i".to_string(),
        device.input_selector(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use devscan_catalog_model::DeviceKind;

    #[test]
    fn listing_shape() {
        assert_eq!(
            listing_args("dshow"),
            ["-list_devices", "true", "-f", "dshow", "-i", "dummy"]
        );
    }

    #[test]
    fn probe_shape_per_kind() {
        let mic = DeviceRecord::new(
            "Krisp Microphone (Krisp Audio)",
            r"@device_cm_{33D9A762-90C8-11D0-BD43-00A0C911CE86}\wave_{70C2267E-6685-4496-B3E7-23FAA519FC58}",
            DeviceKind::Audio,
        );
        assert_eq!(
            probe_args("dshow", &mic),
            [
                "-list_options",
                "true",
                "-f",
                "dshow",
                "-i",
                r"audio=@device_cm_{33D9A762-90C8-11D0-BD43-00A0C911CE86}\wave_{70C2267E-6685-4496-B3E7-23FAA519FC58}",
            ]
        );

        let cam = DeviceRecord::new("Cam", "@device_cam", DeviceKind::Video);
        assert_eq!(probe_args("dshow", &cam)[5], "video=@device_cam");
    }
}
