use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use devscan_common::config::ToolConfig;
use tokio::process::Command;

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// How the tool process is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Program name (resolved via PATH) or path.
    pub program: PathBuf,

    /// Upper bound on one invocation; the child is killed when it expires.
    pub timeout: Duration,

    /// Do not open a console window for the child (Windows).
    pub hide_window: bool,

    /// Put the child in its own process group so console signals aimed at
    /// the caller do not reach it.
    pub detach: bool,
}

impl LaunchConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command with stdio wired for diagnostic capture and the platform
    /// launch flags applied. Arguments are left to the caller.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        {
            let mut flags = 0;
            if self.hide_window {
                flags |= CREATE_NO_WINDOW;
            }
            if self.detach {
                flags |= CREATE_NEW_PROCESS_GROUP;
            }
            cmd.creation_flags(flags);
        }

        #[cfg(unix)]
        if self.detach {
            cmd.process_group(0);
        }

        cmd
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::from(&ToolConfig::default())
    }
}

impl From<&ToolConfig> for LaunchConfig {
    fn from(config: &ToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            hide_window: config.hide_window,
            detach: config.detach,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_tool_config() {
        let config = ToolConfig {
            program: PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"),
            timeout_ms: 2500,
            hide_window: false,
            ..ToolConfig::default()
        };
        let launch = LaunchConfig::from(&config);
        assert_eq!(launch.program, PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"));
        assert_eq!(launch.timeout, Duration::from_millis(2500));
        assert!(!launch.hide_window);
        assert!(launch.detach);
    }
}
