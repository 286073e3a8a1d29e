// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Video stream information as reported by the probe capability
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStreamInfo {
    pub index: usize,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub sample_aspect_ratio: Option<String>,
    pub display_aspect_ratio: Option<String>,
    pub frame_rate: Option<f64>,
    /// Rotation in degrees from stream side data (or legacy rotate tag)
    pub rotation: Option<i32>,
    /// Rotation hint attached to a display-matrix side-data entry
    pub displaymatrix: Option<i32>,
}

impl VideoStreamInfo {
    /// Create new video stream info with validation
    pub fn new(index: usize, codec: String, width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::ProbeFailure {
                path: format!("stream #{}", index),
                message: "video dimensions cannot be zero".to_string(),
            });
        }

        Ok(Self {
            index,
            codec,
            width,
            height,
            sample_aspect_ratio: None,
            display_aspect_ratio: None,
            frame_rate: None,
            rotation: None,
            displaymatrix: None,
        })
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_displaymatrix(mut self, displaymatrix: i32) -> Self {
        self.displaymatrix = Some(displaymatrix);
        self
    }

    /// Rotation in degrees, absent treated as no rotation
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation.unwrap_or(0)
    }

    /// Display-matrix rotation in degrees, absent treated as no rotation
    pub fn displaymatrix_degrees(&self) -> i32 {
        self.displaymatrix.unwrap_or(0)
    }
}

/// Probed media file: every video stream plus a count of audio streams
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub video_streams: Vec<VideoStreamInfo>,
    pub audio_stream_count: usize,
}

impl MediaInfo {
    pub fn new(path: PathBuf, video_streams: Vec<VideoStreamInfo>, audio_stream_count: usize) -> Self {
        Self {
            path,
            video_streams,
            audio_stream_count,
        }
    }

    /// Get primary video stream (the first one)
    pub fn primary_video_stream(&self) -> Option<&VideoStreamInfo> {
        self.video_streams.first()
    }

    /// Primary video stream, or `MissingVideoStream`
    pub fn require_video_stream(&self) -> Result<&VideoStreamInfo, DomainError> {
        self.primary_video_stream()
            .ok_or_else(|| DomainError::MissingVideoStream {
                path: self.path.display().to_string(),
            })
    }

    pub fn has_audio(&self) -> bool {
        self.audio_stream_count > 0
    }
}

/// Orientation verdict for a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Styling for the timestamp overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayStyle {
    /// Seconds from the start of the clip during which the overlay is shown
    pub duration_secs: u32,
    pub font_size: u32,
    /// Distance kept between the time line and the bottom edge
    pub padding: u32,
}

/// Output canvas every clip is normalized to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCanvas {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub overlay: OverlayStyle,
}

/// A single geometric or overlay operation of a transform plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformStep {
    NormalizeFramerate {
        fps: u32,
    },
    NormalizePixelAspect,
    SetDisplayAspect {
        num: u32,
        den: u32,
    },
    Scale {
        width_expr: String,
        height_expr: String,
    },
    Pad {
        width: u32,
        height: u32,
        x_expr: String,
        y_expr: String,
        color: String,
    },
    OverlayText {
        text: String,
        x_expr: String,
        y_expr: String,
        font_size: u32,
        color: String,
        until_seconds: u32,
    },
}

impl TransformStep {
    /// Render as an ffmpeg filter with its options
    pub fn to_filter(&self) -> String {
        match self {
            TransformStep::NormalizeFramerate { fps } => format!("fps=fps={}:round=up", fps),
            TransformStep::NormalizePixelAspect => "setsar=1/1".to_string(),
            TransformStep::SetDisplayAspect { num, den } => format!("setdar={}/{}", num, den),
            TransformStep::Scale {
                width_expr,
                height_expr,
            } => format!(
                "scale={}:{}",
                quote_filter_value(width_expr),
                quote_filter_value(height_expr)
            ),
            TransformStep::Pad {
                width,
                height,
                x_expr,
                y_expr,
                color,
            } => format!(
                "pad={}:{}:{}:{}:color={}",
                width,
                height,
                quote_filter_value(x_expr),
                quote_filter_value(y_expr),
                color
            ),
            TransformStep::OverlayText {
                text,
                x_expr,
                y_expr,
                font_size,
                color,
                until_seconds,
            } => format!(
                "drawtext=text={}:fontcolor={}:fontsize={}:x={}:y={}:enable={}",
                quote_filter_value(text),
                color,
                font_size,
                quote_filter_value(x_expr),
                quote_filter_value(y_expr),
                quote_filter_value(&format!("lte(t,{})", until_seconds))
            ),
        }
    }
}

/// Quote a filter option value for both the filtergraph and option parsers.
///
/// The graph parser strips the outer quotes and leaves the inside untouched,
/// the option parser then unescapes `\:`, `\'` and `\\`.
fn quote_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' | ':' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            // a quote cannot appear inside a quoted graph section
            '\'' => escaped.push_str("'\\\\\\''"),
            _ => escaped.push(ch),
        }
    }
    escaped.push('\'');
    escaped
}

/// Ordered sequence of operations applied to one clip
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransformPlan {
    pub steps: Vec<TransformStep>,
}

impl TransformPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the plan carries the timestamp overlay
    pub fn has_overlay(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, TransformStep::OverlayText { .. }))
    }

    /// Render the whole plan as a single comma-joined filter chain
    pub fn to_filtergraph(&self) -> String {
        self.steps
            .iter()
            .map(TransformStep::to_filter)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Fixed output encoding profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeProfile {
    pub video_codec: String,
    pub crf: u8,
    pub preset: String,
    pub pixel_format: String,
    pub container: String,
    /// Forces square pixels at the bitstream level
    pub video_bitstream_filter: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 18,
            preset: "slow".to_string(),
            pixel_format: "yuv420p".to_string(),
            container: "mp4".to_string(),
            video_bitstream_filter: "h264_metadata=sample_aspect_ratio=1/1".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

/// Everything the encode capability needs for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeJob {
    pub input: PathBuf,
    /// Absolute index of the probed video stream the plan was built for
    pub video_stream_index: usize,
    pub output: PathBuf,
    pub plan: TransformPlan,
    pub profile: EncodeProfile,
    pub overwrite: bool,
}

/// Terminal state of a clip within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    Skipped,
    Succeeded,
    Failed,
}

/// Per-clip outcome reported by the batch pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipReport {
    pub file_name: String,
    pub status: ClipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    pub timestamp_overlay: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClipReport {
    pub fn skipped(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            status: ClipStatus::Skipped,
            orientation: None,
            timestamp_overlay: false,
            error: None,
        }
    }

    pub fn succeeded(file_name: impl Into<String>, orientation: Orientation, timestamp_overlay: bool) -> Self {
        Self {
            file_name: file_name.into(),
            status: ClipStatus::Succeeded,
            orientation: Some(orientation),
            timestamp_overlay,
            error: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, error: &DomainError) -> Self {
        Self {
            file_name: file_name.into(),
            status: ClipStatus::Failed,
            orientation: None,
            timestamp_overlay: false,
            error: Some(error.to_string()),
        }
    }
}

/// Result of the concatenation phase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConcatOutcome {
    Combined { output: PathBuf, clip_count: usize },
    NothingToCombine,
    Failed { message: String },
}

/// Result of the best-effort cleanup phase
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CleanupReport {
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<String>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Summary of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub clips: Vec<ClipReport>,
    pub concatenation: ConcatOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupReport>,
}

impl BatchReport {
    pub fn count(&self, status: ClipStatus) -> usize {
        self.clips.iter().filter(|clip| clip.status == status).count()
    }

    pub fn failed_clips(&self) -> impl Iterator<Item = &ClipReport> {
        self.clips
            .iter()
            .filter(|clip| clip.status == ClipStatus::Failed)
    }
}

/// Ordered list of processed clips handed to the concat demuxer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `file '<path>'` line per entry. Embedded single quotes become `'\''`.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|path| format!("file '{}'\n", path.display().to_string().replace('\'', "'\\''")))
            .collect()
    }

    /// Read back a manifest produced by `render`; other lines are ignored
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter_map(|line| line.trim().strip_prefix("file '")?.strip_suffix('\''))
            .map(|quoted| PathBuf::from(quoted.replace("'\\''", "'")))
            .collect();
        Self { entries }
    }
}
