//! Catalog assembly: one listing call, one probe per discovered device.

use std::borrow::Cow;
use std::sync::Arc;

use devscan_catalog_model::{
    DeviceCatalog, DeviceEntry, DeviceKind, DeviceOptions, DeviceRecord, ScanReport,
};
use devscan_common::error::{DevscanError, DevscanResult};
use devscan_scrape_core::{parse_audio_options, parse_video_options, scan_listing, LinePolicy};
use tokio::sync::Semaphore;

use crate::invocation::{listing_args, probe_args};
use crate::runner::ToolRunner;

/// Knobs for one catalog build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Probe calls allowed in flight at once. `1` probes strictly in
    /// listing order.
    pub probe_concurrency: usize,

    /// What a malformed capability line does to its device.
    pub line_policy: LinePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            probe_concurrency: 1,
            line_policy: LinePolicy::Strict,
        }
    }
}

/// Builds a [`DeviceCatalog`] by driving a [`ToolRunner`].
pub struct CatalogAssembler {
    runner: Arc<dyn ToolRunner>,
    backend: String,
    options: ScanOptions,
}

impl CatalogAssembler {
    pub fn new(runner: Arc<dyn ToolRunner>, backend: impl Into<String>) -> Self {
        Self {
            runner,
            backend: backend.into(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Run a scan and wrap the catalog with when and how it was taken.
    pub async fn scan(&self) -> DevscanResult<ScanReport> {
        let scanned_at = chrono::Utc::now();
        let catalog = self.assemble().await?;
        Ok(ScanReport::new(
            scanned_at,
            self.runner.program(),
            &self.backend,
            catalog,
        ))
    }

    /// Build the catalog.
    ///
    /// A failing listing call fails the whole build. Anything that goes
    /// wrong while probing a single device is recorded as that device's
    /// error and the build carries on.
    pub async fn assemble(&self) -> DevscanResult<DeviceCatalog> {
        let listing = self.runner.run(&listing_args(&self.backend)).await?;
        let text = listing.decode_lossy();
        if matches!(text, Cow::Owned(_)) {
            tracing::warn!(
                backend = %self.backend,
                "Listing output is not valid UTF-8; invalid bytes were replaced"
            );
        }

        let scan = scan_listing(&text);
        let devices = scan.records();
        tracing::info!(
            backend = %self.backend,
            devices = devices.len(),
            rejected_blocks = scan.rejected.len(),
            "Device listing parsed"
        );
        if devices.is_empty() {
            tracing::warn!(
                backend = %self.backend,
                "Listing contained no device blocks; returning an empty catalog"
            );
        }

        let slots = self.probe_all(&devices).await;

        let mut catalog = DeviceCatalog::new();
        for (device, options) in devices.into_iter().zip(slots) {
            catalog.push(
                device.kind,
                DeviceEntry {
                    name: device.display_name,
                    alternative_name: device.alternative_name,
                    options,
                },
            );
        }

        tracing::info!(
            audio = catalog.audio.len(),
            video = catalog.video.len(),
            failed = catalog.failures().count(),
            "Device catalog assembled"
        );
        Ok(catalog)
    }

    /// Probe every device; the result has one slot per device, in listing
    /// order, whatever order the probes finish in.
    ///
    /// Probes start in listing order: a permit is taken before each task is
    /// spawned, so with one permit every probe waits for the previous one.
    async fn probe_all(&self, devices: &[DeviceRecord]) -> Vec<DeviceOptions> {
        let permits = Arc::new(Semaphore::new(self.options.probe_concurrency.max(1)));

        let mut handles = Vec::with_capacity(devices.len());
        for device in devices {
            // The semaphore is never closed, so this only fails in theory;
            // the probe then runs without a permit.
            let permit = Arc::clone(&permits).acquire_owned().await.ok();
            let runner = Arc::clone(&self.runner);
            let device = device.clone();
            let args = probe_args(&self.backend, &device);
            let policy = self.options.line_policy;
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                probe_device(runner.as_ref(), &device, &args, policy).await
            }));
        }

        let mut slots = Vec::with_capacity(devices.len());
        for (device, handle) in devices.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(DevscanError::Other(anyhow::anyhow!(
                    "probe task aborted: {join_err}"
                ))),
            };

            slots.push(match outcome {
                Ok(options) => {
                    tracing::debug!(
                        device = %device.display_name,
                        kind = %device.kind,
                        options = options.len(),
                        "Device probed"
                    );
                    options
                }
                Err(err) => {
                    tracing::warn!(
                        device = %device.display_name,
                        kind = %device.kind,
                        error = %err,
                        invocation_failure = err.is_invocation_failure(),
                        "Device probe failed"
                    );
                    DeviceOptions::failed(err.to_string())
                }
            });
        }
        slots
    }
}

async fn probe_device(
    runner: &dyn ToolRunner,
    device: &DeviceRecord,
    args: &[String],
    policy: LinePolicy,
) -> DevscanResult<DeviceOptions> {
    let output = runner.run(args).await?;
    let text = output.decode()?;
    match device.kind {
        DeviceKind::Audio => parse_audio_options(&text, policy).map(DeviceOptions::audio),
        DeviceKind::Video => parse_video_options(&text, policy).map(DeviceOptions::video),
    }
}
