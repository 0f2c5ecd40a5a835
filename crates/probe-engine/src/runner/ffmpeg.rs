use devscan_common::error::{DevscanError, DevscanResult};

use crate::runner::{LaunchConfig, ToolOutput, ToolRunner};

/// Runs the real ffmpeg binary.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    launch: LaunchConfig,
}

impl FfmpegRunner {
    pub fn new(launch: LaunchConfig) -> Self {
        Self { launch }
    }
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new(LaunchConfig::default())
    }
}

#[async_trait::async_trait]
impl ToolRunner for FfmpegRunner {
    async fn run(&self, args: &[String]) -> DevscanResult<ToolOutput> {
        let program = self.program();
        tracing::debug!(%program, ?args, "Running tool");

        let mut cmd = self.launch.command();
        cmd.args(args);
        let child = cmd
            .spawn()
            .map_err(|e| DevscanError::launch(&program, e.to_string()))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.launch.timeout, child.wait_with_output()).await
        {
            Ok(result) => result.map_err(|e| DevscanError::launch(&program, e.to_string()))?,
            Err(_) => {
                return Err(DevscanError::timeout(
                    program,
                    self.launch.timeout.as_millis() as u64,
                ))
            }
        };

        let Some(code) = output.status.code() else {
            return Err(DevscanError::terminated(program, output.status.to_string()));
        };

        tracing::debug!(
            %program,
            exit_code = code,
            diagnostic_bytes = output.stderr.len(),
            "Tool finished"
        );

        Ok(ToolOutput::new(Some(code), output.stderr))
    }

    fn program(&self) -> String {
        self.launch.program.display().to_string()
    }
}
