//! devscan scrape core
//!
//! Turns ffmpeg's human-readable diagnostic text into typed values:
//! - **Classifier:** picks bracketed `[tag] key=value` lines out of noise
//! - **Listing:** finds device blocks in `-list_devices` output
//! - **Audio / Video:** decode `-list_options` lines into capability options
//!
//! This crate is pure computation: no processes, no I/O. Every stage
//! reports `Matched`, `Skipped` (noise) or `Malformed` (looked like data
//! but could not be decoded) so callers can tell the two failure shapes
//! apart.

pub mod audio;
pub mod classify;
pub mod listing;
pub mod video;

pub use audio::{parse_audio_line, parse_audio_options};
pub use classify::{classify_line, Classified, LinePolicy, LineRule};
pub use listing::{extract_devices, scan_listing, DeviceBlock, ListingScan, RejectedBlock};
pub use video::{parse_video_line, parse_video_options};
