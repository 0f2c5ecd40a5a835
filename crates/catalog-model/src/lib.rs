//! devscan catalog model
//!
//! Defines the data contracts produced by a device scan:
//! - **Devices:** what the listing pass discovered (name, alternative name, kind)
//! - **Options:** typed audio/video capability entries recovered from probe output
//! - **Catalog:** per-kind, index-addressed device entries with options or an error
//!
//! Everything here is plain data. The JSON shape mirrors the labels the
//! capture tool itself prints (`ch`, `bits`, `rate`, `min_s`, `max_s`, ...).

pub mod catalog;
pub mod device;
pub mod options;
pub mod report;

pub use catalog::*;
pub use device::*;
pub use options::*;
pub use report::*;
