//! Audio capability lines (`ch= 2, bits=16, rate= 44100`).

use devscan_catalog_model::AudioOption;
use devscan_common::error::DevscanResult;

use crate::classify::{scrape_lines, Classified, LinePolicy, LineRule};

/// Decode one tag-stripped audio line.
///
/// Values are taken positionally as channels, bit depth, sample rate; the
/// labels in front of `=` are not read. Lines that do not split into exactly
/// three components are skipped.
pub fn parse_audio_line(remainder: &str) -> Classified<AudioOption> {
    let components: Vec<&str> = remainder.trim().splitn(3, ", ").collect();
    if components.len() != 3 {
        return Classified::Skipped;
    }

    let mut values = [0u32; 3];
    for (slot, component) in values.iter_mut().zip(&components) {
        let Some((_, value)) = component.split_once('=') else {
            return Classified::Malformed(format!("audio component `{component}` has no `=`"));
        };
        if value.contains('=') {
            return Classified::Malformed(format!(
                "audio component `{component}` has more than one `=`"
            ));
        }
        match value.trim().parse::<u32>() {
            Ok(v) => *slot = v,
            Err(_) => {
                return Classified::Malformed(format!(
                    "audio value `{}` is not an unsigned integer",
                    value.trim()
                ))
            }
        }
    }

    let [channel_count, bit_depth, sample_rate_hz] = values;
    Classified::Matched(AudioOption::new(channel_count, bit_depth, sample_rate_hz))
}

/// Decode every audio option in a probe's diagnostic text, in output order.
pub fn parse_audio_options(text: &str, policy: LinePolicy) -> DevscanResult<Vec<AudioOption>> {
    scrape_lines(text, LineRule::Assignment, policy, parse_audio_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_positional() {
        assert_eq!(
            parse_audio_line("ch=2, bits=16, rate=44100"),
            Classified::Matched(AudioOption::new(2, 16, 44100))
        );
        // Labels are ignored, only position matters.
        assert_eq!(
            parse_audio_line("rate=1, ch=8, bits=48000"),
            Classified::Matched(AudioOption::new(1, 8, 48000))
        );
    }

    #[test]
    fn padded_values_are_trimmed() {
        assert_eq!(
            parse_audio_line("ch= 1, bits= 8, rate= 11025"),
            Classified::Matched(AudioOption::new(1, 8, 11025))
        );
    }

    #[test]
    fn wrong_component_count_is_skipped() {
        assert_eq!(parse_audio_line("ch=2, bits=16"), Classified::Skipped);
        assert_eq!(parse_audio_line("sample_rate=48000"), Classified::Skipped);
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        assert!(parse_audio_line("ch=two, bits=16, rate=44100").is_malformed());
    }

    #[test]
    fn trailing_component_does_not_replace_sample_rate() {
        // splitn keeps a fourth component glued to the third.
        let line = "ch=2, bits=16, rate=44100, extra=1";
        assert!(parse_audio_line(line).is_malformed());
        assert!(parse_audio_line("ch=2, bits=16, rate=rate=44100").is_malformed());

        let text = format!("[dshow @ 0]   {line}\n[dshow @ 0]   ch=1, bits=8, rate=8000\n");
        assert!(parse_audio_options(&text, LinePolicy::Strict).is_err());
        assert_eq!(
            parse_audio_options(&text, LinePolicy::Lenient).unwrap(),
            vec![AudioOption::new(1, 8, 8000)]
        );
    }

    #[test]
    fn probe_text_yields_options_in_order() {
        let text = "\
[dshow @ 000001f0c2a8e6c0] DirectShow audio only device options (from audio devices)\r
[dshow @ 000001f0c2a8e6c0]  Pin \"Capture\" (alternative pin name \"Capture\")\r
[dshow @ 000001f0c2a8e6c0]   ch= 2, bits=16, rate= 44100\r
[dshow @ 000001f0c2a8e6c0]   ch= 1, bits=16, rate= 44100\r
[dshow @ 000001f0c2a8e6c0]   ch= 2, bits= 8, rate= 22050\r
[in#0 @ 000001f0c2a8e500] Error opening input: Immediate exit requested\r
Error opening input file audio=@device_cm_{33D9A762-90C8-11D0-BD43-00A0C911CE86}\\wave_{70C2267E}.\r
";
        let options = parse_audio_options(text, LinePolicy::Strict).unwrap();
        assert_eq!(
            options,
            vec![
                AudioOption::new(2, 16, 44100),
                AudioOption::new(1, 16, 44100),
                AudioOption::new(2, 8, 22050),
            ]
        );
    }

    #[test]
    fn no_capability_lines_is_an_empty_success() {
        let text = "[dshow @ 0] DirectShow audio only device options (from audio devices)\n";
        assert!(parse_audio_options(text, LinePolicy::Strict).unwrap().is_empty());
    }
}
