//! Build the device catalog from a live ffmpeg.

use std::path::PathBuf;
use std::sync::Arc;

use devscan_common::config::AppConfig;
use devscan_probe_engine::{CatalogAssembler, FfmpegRunner, LaunchConfig, ScanOptions};
use devscan_scrape_core::LinePolicy;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct ListOverrides {
    pub program: Option<PathBuf>,
    pub backend: Option<String>,
    pub timeout_ms: Option<u64>,
    pub jobs: Option<usize>,
    pub lenient: bool,
}

impl ListOverrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(program) = self.program {
            config.tool.program = program;
        }
        if let Some(backend) = self.backend {
            config.tool.backend = backend;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.tool.timeout_ms = timeout_ms;
        }
        if let Some(jobs) = self.jobs {
            config.scan.probe_concurrency = jobs;
        }
        if self.lenient {
            config.scan.strict_lines = false;
        }
    }
}

pub async fn run(
    mut config: AppConfig,
    overrides: ListOverrides,
    report: bool,
) -> anyhow::Result<()> {
    overrides.apply(&mut config);
    if config.tool.timeout_ms == 0 {
        anyhow::bail!("--timeout-ms must be greater than zero");
    }

    let runner = Arc::new(FfmpegRunner::new(LaunchConfig::from(&config.tool)));
    let assembler = CatalogAssembler::new(runner, config.tool.backend.clone()).with_options(
        ScanOptions {
            probe_concurrency: config.scan.probe_concurrency.max(1),
            line_policy: LinePolicy::from_strict(config.scan.strict_lines),
        },
    );

    let scan = assembler
        .scan()
        .await
        .map_err(|e| anyhow::anyhow!("Device listing failed: {e}"))?;

    if scan.failed_devices() > 0 {
        tracing::warn!(
            failed = scan.failed_devices(),
            "Some devices could not be probed; see their error entries"
        );
    }

    let json = if report {
        serde_json::to_string_pretty(&scan)?
    } else {
        serde_json::to_string_pretty(&scan.catalog)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = AppConfig::default();
        ListOverrides {
            program: Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")),
            backend: None,
            timeout_ms: Some(2500),
            jobs: Some(4),
            lenient: true,
        }
        .apply(&mut config);

        assert_eq!(config.tool.program, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.tool.backend, "dshow");
        assert_eq!(config.tool.timeout_ms, 2500);
        assert_eq!(config.scan.probe_concurrency, 4);
        assert!(!config.scan.strict_lines);
    }

    #[test]
    fn empty_overrides_keep_config() {
        let mut config = AppConfig::default();
        config.scan.strict_lines = true;
        ListOverrides::default().apply(&mut config);
        assert!(config.scan.strict_lines);
        assert_eq!(config.tool.timeout_ms, 10_000);
    }
}
