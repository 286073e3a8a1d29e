//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` as a child process and maps its JSON stream listing onto
//! the domain model. Rotation metadata shows up in two shapes: a side-data
//! entry with a `rotation` field, or a display-matrix side-data entry. Both
//! are carried through as independent optional values.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    sample_aspect_ratio: Option<String>,
    display_aspect_ratio: Option<String>,
    r_frame_rate: Option<String>,
    #[serde(default)]
    side_data_list: Vec<FfprobeSideData>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeSideData {
    rotation: Option<Value>,
    displaymatrix: Option<Value>,
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, file_path: &Path) -> Result<MediaInfo, DomainError> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(file_path)
            .output()
            .await
            .map_err(|e| DomainError::ProbeFailure {
                path: file_path.display().to_string(),
                message: format!("failed to run {}: {}", self.ffprobe_path, e),
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailure {
                path: file_path.display().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout);
        debug!("ffprobe output for {}: {}", file_path.display(), json);
        parse_probe_output(file_path, &json)
    }
}

/// Map ffprobe's `-show_streams` JSON onto `MediaInfo`
pub fn parse_probe_output(file_path: &Path, json: &str) -> Result<MediaInfo, DomainError> {
    let parsed: FfprobeOutput = serde_json::from_str(json).map_err(|e| DomainError::ProbeFailure {
        path: file_path.display().to_string(),
        message: format!("unreadable ffprobe output: {}", e),
    })?;

    let mut video_streams = Vec::new();
    let mut audio_stream_count = 0;

    for stream in parsed.streams {
        match stream.codec_type.as_deref() {
            Some("video") => {
                if let Some(info) = video_stream_info(file_path, stream)? {
                    video_streams.push(info);
                }
            }
            Some("audio") => audio_stream_count += 1,
            _ => {}
        }
    }

    Ok(MediaInfo::new(
        file_path.to_path_buf(),
        video_streams,
        audio_stream_count,
    ))
}

fn video_stream_info(file_path: &Path, stream: FfprobeStream) -> Result<Option<VideoStreamInfo>, DomainError> {
    // cover art and similar attachments come through as dimensionless video
    let (width, height) = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Ok(None),
    };

    let mut info = VideoStreamInfo::new(
        stream.index,
        stream.codec_name.unwrap_or_default(),
        width,
        height,
    )
    .map_err(|e| DomainError::ProbeFailure {
        path: file_path.display().to_string(),
        message: e.to_string(),
    })?;

    info.sample_aspect_ratio = stream.sample_aspect_ratio;
    info.display_aspect_ratio = stream.display_aspect_ratio;
    info.frame_rate = stream.r_frame_rate.as_deref().and_then(parse_frame_rate);

    for side_data in &stream.side_data_list {
        let degrees = side_data.rotation.as_ref().and_then(value_as_degrees);
        if degrees.is_some() {
            info.rotation = degrees;
        }
        // the display-matrix hint is read from the entry's rotation field
        if side_data.displaymatrix.is_some() {
            info.displaymatrix = Some(degrees.unwrap_or(0));
        }
    }

    if info.rotation.is_none() {
        info.rotation = stream.tags.get("rotate").and_then(|v| v.trim().parse().ok());
    }

    Ok(Some(info))
}

fn value_as_degrees(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .and_then(|d| i32::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/').unwrap_or((rate, "1"));
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    (den != 0.0).then(|| num / den)
}
