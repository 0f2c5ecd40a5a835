use std::borrow::Cow;

use devscan_common::error::{DevscanError, DevscanResult};

/// Captured result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code. ffmpeg exits non-zero after listing, so this is
    /// informational only.
    pub exit_code: Option<i32>,

    /// Everything the tool wrote to stderr.
    pub diagnostics: Vec<u8>,
}

impl ToolOutput {
    pub fn new(exit_code: Option<i32>, diagnostics: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            diagnostics: diagnostics.into(),
        }
    }

    /// Diagnostic text as UTF-8.
    pub fn decode(&self) -> DevscanResult<String> {
        String::from_utf8(self.diagnostics.clone()).map_err(|e| DevscanError::decode(e.to_string()))
    }

    /// Diagnostic text with invalid UTF-8 replaced by U+FFFD. Borrowed when
    /// the bytes were already valid.
    pub fn decode_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.diagnostics)
    }
}

/// Abstract interface to the external media tool.
#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the tool with `args` and return its complete diagnostic output.
    async fn run(&self, args: &[String]) -> DevscanResult<ToolOutput>;

    /// Program name, for logs and reports.
    fn program(&self) -> String;
}

pub mod ffmpeg;
pub mod launch;

pub use ffmpeg::FfmpegRunner;
pub use launch::LaunchConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let output = ToolOutput::new(Some(1), vec![b'[', 0xff, b']']);
        assert!(matches!(output.decode(), Err(DevscanError::Decode { .. })));

        let output = ToolOutput::new(Some(1), "[dshow @ 0] ok");
        assert_eq!(output.decode().unwrap(), "[dshow @ 0] ok");
    }

    #[test]
    fn lossy_decode_replaces_invalid_bytes() {
        let output = ToolOutput::new(Some(1), vec![b'a', 0xf6, b'b']);
        assert_eq!(output.decode_lossy(), "a\u{fffd}b");

        let output = ToolOutput::new(Some(1), "ok");
        assert!(matches!(output.decode_lossy(), Cow::Borrowed("ok")));
    }
}
