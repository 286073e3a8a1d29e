//! Typed run configuration
//!
//! Every layer (TOML file, environment, command line) produces a
//! `PartialSettings`. Layers are merged with `PartialSettings::overlay` and
//! turned into an immutable, validated `Settings` once at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{OverlayStyle, TargetCanvas};
use crate::utils::path::is_valid_output_filename;

pub const DEFAULT_FINAL_OUTPUT_FILE: &str = "home_videos.mp4";
pub const DEFAULT_OUTPUT_SUBDIR: &str = "output";
pub const MANIFEST_FILE_NAME: &str = "videos.txt";

/// One configuration layer; unset fields fall through to the next layer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_video: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fps: Option<i64>,
    pub ts_duration: Option<i64>,
    pub ts_fontsize: Option<i64>,
    pub ts_padding: Option<i64>,
    pub ffmpeg_path: Option<String>,
    pub ffprobe_path: Option<String>,
    pub resume: Option<bool>,
    pub keep_intermediates: Option<bool>,
    pub require_timestamp: Option<bool>,
}

impl PartialSettings {
    /// Fill every unset field of `self` from `lower`
    pub fn overlay(self, lower: PartialSettings) -> PartialSettings {
        PartialSettings {
            input_dir: self.input_dir.or(lower.input_dir),
            output_dir: self.output_dir.or(lower.output_dir),
            output_video: self.output_video.or(lower.output_video),
            width: self.width.or(lower.width),
            height: self.height.or(lower.height),
            fps: self.fps.or(lower.fps),
            ts_duration: self.ts_duration.or(lower.ts_duration),
            ts_fontsize: self.ts_fontsize.or(lower.ts_fontsize),
            ts_padding: self.ts_padding.or(lower.ts_padding),
            ffmpeg_path: self.ffmpeg_path.or(lower.ffmpeg_path),
            ffprobe_path: self.ffprobe_path.or(lower.ffprobe_path),
            resume: self.resume.or(lower.resume),
            keep_intermediates: self.keep_intermediates.or(lower.keep_intermediates),
            require_timestamp: self.require_timestamp.or(lower.require_timestamp),
        }
    }

    /// Built-in defaults, the bottom layer
    pub fn defaults() -> PartialSettings {
        PartialSettings {
            input_dir: None,
            output_dir: None,
            output_video: Some(DEFAULT_FINAL_OUTPUT_FILE.to_string()),
            width: Some(1920),
            height: Some(1080),
            fps: Some(30),
            ts_duration: Some(5),
            ts_fontsize: Some(60),
            ts_padding: Some(30),
            ffmpeg_path: Some("ffmpeg".to_string()),
            ffprobe_path: Some("ffprobe".to_string()),
            resume: Some(false),
            keep_intermediates: Some(false),
            require_timestamp: Some(false),
        }
    }

    /// Overlay `layers` (highest precedence first) on the defaults
    pub fn merge<I>(layers: I) -> PartialSettings
    where
        I: IntoIterator<Item = PartialSettings>,
    {
        layers
            .into_iter()
            .fold(PartialSettings::default(), PartialSettings::overlay)
            .overlay(PartialSettings::defaults())
    }

    /// Validated output canvas from the numeric fields
    pub fn canvas(&self) -> Result<TargetCanvas, DomainError> {
        Ok(TargetCanvas {
            width: positive("width", self.width)?,
            height: positive("height", self.height)?,
            fps: positive("fps", self.fps)?,
            overlay: OverlayStyle {
                duration_secs: positive("ts_duration", self.ts_duration)?,
                font_size: positive("ts_fontsize", self.ts_fontsize)?,
                padding: positive("ts_padding", self.ts_padding)?,
            },
        })
    }
}

/// Validated, immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub final_output_file: String,
    pub canvas: TargetCanvas,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// Keep existing outputs so already-processed clips are skipped
    pub resume: bool,
    /// Leave processed clips and the manifest in place after combining
    pub keep_intermediates: bool,
    /// Fail a clip whose filename carries no timestamp instead of skipping the overlay
    pub require_timestamp: bool,
}

impl Settings {
    /// Merge `layers` (highest precedence first) over the defaults and validate
    pub fn from_layers<I>(layers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = PartialSettings>,
    {
        Self::validate(PartialSettings::merge(layers))
    }

    fn validate(mut partial: PartialSettings) -> Result<Self, DomainError> {
        let input_dir = partial
            .input_dir
            .take()
            .ok_or_else(|| DomainError::Configuration("Input directory is required".to_string()))?;
        if !input_dir.is_dir() {
            return Err(DomainError::Configuration(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        let output_dir = match partial.output_dir.take() {
            Some(dir) => dir,
            None => absolute(&input_dir)?.join(DEFAULT_OUTPUT_SUBDIR),
        };
        if !output_dir.is_absolute() {
            return Err(DomainError::Configuration(format!(
                "Output directory is not a valid absolute path: {}",
                output_dir.display()
            )));
        }
        // clearing or cleaning the output folder must never reach the sources
        if canonical(&input_dir).starts_with(canonical(&output_dir)) {
            return Err(DomainError::Configuration(format!(
                "Output directory {} must not be the input directory or contain it",
                output_dir.display()
            )));
        }

        let final_output_file = with_mp4_suffix(partial.output_video.take().unwrap_or_default());
        if !is_valid_output_filename(&final_output_file) {
            return Err(DomainError::Configuration(format!(
                "Invalid output video filename: {}. Avoid using special characters.",
                final_output_file
            )));
        }

        let canvas = partial.canvas()?;

        Ok(Self {
            input_dir,
            output_dir,
            final_output_file,
            canvas,
            ffmpeg_path: partial.ffmpeg_path.unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: partial.ffprobe_path.unwrap_or_else(|| "ffprobe".to_string()),
            resume: partial.resume.unwrap_or(false),
            keep_intermediates: partial.keep_intermediates.unwrap_or(false),
            require_timestamp: partial.require_timestamp.unwrap_or(false),
        })
    }

    /// Path of the single concatenated output file
    pub fn final_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.final_output_file)
    }

    /// Path of the concatenation manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }
}

fn with_mp4_suffix(name: String) -> String {
    if name.to_lowercase().ends_with(".mp4") {
        name
    } else {
        format!("{}.mp4", name)
    }
}

fn positive(name: &str, value: Option<i64>) -> Result<u32, DomainError> {
    match value {
        Some(v) if v > 0 => u32::try_from(v).map_err(|_| {
            DomainError::Configuration(format!("Invalid value for {}: {}. Value is too large.", name, v))
        }),
        Some(v) => Err(DomainError::Configuration(format!(
            "Invalid value for {}: {}. Must be a number greater than 0.",
            name, v
        ))),
        None => Err(DomainError::Configuration(format!("Missing value for {}", name))),
    }
}

/// Resolve symlinks and `..` through the deepest existing ancestor
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonical(parent).join(name),
        _ => path.to_path_buf(),
    }
}

fn absolute(path: &Path) -> Result<PathBuf, DomainError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| DomainError::Configuration(format!("Cannot resolve {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests;
