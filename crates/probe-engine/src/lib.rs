//! devscan probe engine
//!
//! Drives the external tool and assembles the device catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 CatalogAssembler                  │
//! │                                                   │
//! │   listing call ──► scan_listing ──► DeviceRecord* │
//! │                                        │          │
//! │              ┌─────────────────────────┤          │
//! │              ▼                         ▼          │
//! │   probe (audio=<alt>)        probe (video=<alt>)  │
//! │   parse_audio_options        parse_video_options  │
//! │              │                         │          │
//! │              └──────► slot[i] ◄────────┘          │
//! │                          │                        │
//! │                          ▼                        │
//! │                    DeviceCatalog                  │
//! └──────────────────────────────────────────────────┘
//!        ▲
//!        │ ToolRunner (FfmpegRunner, or canned text in tests)
//! ```

pub mod assembler;
pub mod invocation;
pub mod runner;

pub use assembler::{CatalogAssembler, ScanOptions};
pub use runner::{FfmpegRunner, LaunchConfig, ToolOutput, ToolRunner};
