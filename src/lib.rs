//! homereel home-video normalizer library
//!
//! Scans a folder of clips, normalizes each one to a common canvas with
//! ffmpeg (frame rate, square pixels, pillarboxing for vertical footage and
//! a date/time overlay taken from the filename), then stream-copies the
//! processed clips into a single video.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{BatchInteractor, CleanupInteractor};
pub use config::{PartialSettings, Settings};
pub use domain::errors::DomainError;
pub use domain::model::{BatchReport, ClipReport, ClipStatus, ConcatOutcome, MediaInfo, Orientation, VideoStreamInfo};
