//! Scan report: a catalog snapshot with the context it was taken in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::DeviceCatalog;

/// What a single scan produced, as handed to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// When the listing call was issued.
    pub scanned_at: DateTime<Utc>,

    /// Program that was invoked.
    pub tool: String,

    /// Device-enumeration backend passed to the tool.
    pub backend: String,

    pub catalog: DeviceCatalog,
}

impl ScanReport {
    pub fn new(
        scanned_at: DateTime<Utc>,
        tool: impl Into<String>,
        backend: impl Into<String>,
        catalog: DeviceCatalog,
    ) -> Self {
        Self {
            scanned_at,
            tool: tool.into(),
            backend: backend.into(),
            catalog,
        }
    }

    /// Number of devices whose probe failed.
    pub fn failed_devices(&self) -> usize {
        self.catalog.failures().count()
    }
}
