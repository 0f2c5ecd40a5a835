//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How the external media tool is launched.
    pub tool: ToolConfig,

    /// Catalog assembly settings.
    pub scan: ScanDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// External tool launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program name or path of the ffmpeg executable.
    pub program: PathBuf,

    /// Device-enumeration backend passed via `-f` (e.g. "dshow").
    pub backend: String,

    /// Per-invocation timeout in milliseconds.
    pub timeout_ms: u64,

    /// Suppress the console window of spawned processes (Windows only).
    pub hide_window: bool,

    /// Start spawned processes in their own process group.
    pub detach: bool,
}

/// Catalog assembly defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanDefaults {
    /// Maximum number of probe calls in flight at once.
    pub probe_concurrency: usize,

    /// Treat malformed capability lines as a failure of their device.
    pub strict_lines: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "devscan_probe_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            backend: "dshow".to_string(),
            timeout_ms: 10_000,
            hide_window: true,
            detach: true,
        }
    }
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            probe_concurrency: 1,
            strict_lines: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, crate::DevscanError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), crate::DevscanError> {
        if self.tool.backend.trim().is_empty() {
            return Err(crate::DevscanError::config("tool.backend must not be empty"));
        }
        if self.tool.timeout_ms == 0 {
            return Err(crate::DevscanError::config(
                "tool.timeout_ms must be greater than zero",
            ));
        }
        if self.scan.probe_concurrency == 0 {
            return Err(crate::DevscanError::config(
                "scan.probe_concurrency must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .or_else(|_| std::env::var("APPDATA"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("devscan").join("config.json")
}
