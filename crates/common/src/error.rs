//! Error types shared across devscan crates.

/// Top-level error type for devscan operations.
#[derive(Debug, thiserror::Error)]
pub enum DevscanError {
    #[error("Failed to launch {program}: {message}")]
    Launch { program: String, message: String },

    #[error("{program} terminated abnormally: {message}")]
    Terminated { program: String, message: String },

    #[error("{program} did not finish within {timeout_ms} ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("Diagnostic output is not valid UTF-8: {message}")]
    Decode { message: String },

    #[error("Malformed diagnostic line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DevscanError.
pub type DevscanResult<T> = Result<T, DevscanError>;

impl DevscanError {
    pub fn launch(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Launch {
            program: program.into(),
            message: msg.into(),
        }
    }

    pub fn terminated(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Terminated {
            program: program.into(),
            message: msg.into(),
        }
    }

    pub fn timeout(program: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            program: program.into(),
            timeout_ms,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the external tool never produced a complete diagnostic capture.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            Self::Launch { .. } | Self::Terminated { .. } | Self::Timeout { .. }
        )
    }
}
