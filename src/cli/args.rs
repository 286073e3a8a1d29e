//! Command-line argument definitions
//!
//! Every option can also come from a `HOMEREEL_*` environment variable.
//! Unset options fall through to the config file and then to defaults.

use std::path::PathBuf;

use clap::Args;

use crate::config::PartialSettings;

/// Output canvas and timestamp overlay options
#[derive(Args, Debug, Clone, Default)]
pub struct CanvasArgs {
    /// Output width in pixels [default: 1920]
    #[arg(long, env = "HOMEREEL_WIDTH", allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Output height in pixels [default: 1080]
    #[arg(long, env = "HOMEREEL_HEIGHT", allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Output frame rate [default: 30]
    #[arg(long, env = "HOMEREEL_FPS", allow_negative_numbers = true)]
    pub fps: Option<i64>,

    /// Seconds the timestamp stays on screen [default: 5]
    #[arg(long, env = "HOMEREEL_TS_DURATION", allow_negative_numbers = true)]
    pub ts_duration: Option<i64>,

    /// Timestamp font size [default: 60]
    #[arg(long, env = "HOMEREEL_TS_FONTSIZE", allow_negative_numbers = true)]
    pub ts_fontsize: Option<i64>,

    /// Timestamp distance from the bottom edge [default: 30]
    #[arg(long, env = "HOMEREEL_TS_PADDING", allow_negative_numbers = true)]
    pub ts_padding: Option<i64>,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Folder containing the source videos
    #[arg(short, long, env = "HOMEREEL_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Absolute folder for processed videos [default: <input-dir>/output]
    #[arg(short, long, env = "HOMEREEL_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name of the combined video, `.mp4` appended when missing [default: home_videos.mp4]
    #[arg(long, env = "HOMEREEL_OUTPUT_VIDEO")]
    pub output_video: Option<String>,

    #[command(flatten)]
    pub canvas: CanvasArgs,

    /// TOML config file [default: ./homereel.toml when present]
    #[arg(short, long, env = "HOMEREEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable [default: ffmpeg]
    #[arg(long, env = "HOMEREEL_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// ffprobe executable [default: ffprobe]
    #[arg(long, env = "HOMEREEL_FFPROBE")]
    pub ffprobe: Option<String>,

    /// Keep the output folder and skip videos already processed
    #[arg(long, env = "HOMEREEL_RESUME")]
    pub resume: bool,

    /// Leave processed videos and the manifest after combining
    #[arg(long, env = "HOMEREEL_KEEP_INTERMEDIATES")]
    pub keep_intermediates: bool,

    /// Fail videos whose filename carries no timestamp
    #[arg(long, env = "HOMEREEL_REQUIRE_TIMESTAMP")]
    pub require_timestamp: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// The command-line (and environment) configuration layer
    pub fn to_layer(&self) -> PartialSettings {
        PartialSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            output_video: self.output_video.clone(),
            ffmpeg_path: self.ffmpeg.clone(),
            ffprobe_path: self.ffprobe.clone(),
            resume: self.resume.then_some(true),
            keep_intermediates: self.keep_intermediates.then_some(true),
            require_timestamp: self.require_timestamp.then_some(true),
            ..self.canvas.to_layer()
        }
    }
}

impl CanvasArgs {
    pub fn to_layer(&self) -> PartialSettings {
        PartialSettings {
            width: self.width,
            height: self.height,
            fps: self.fps,
            ts_duration: self.ts_duration,
            ts_fontsize: self.ts_fontsize,
            ts_padding: self.ts_padding,
            ..Default::default()
        }
    }
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Video file to inspect
    pub input: PathBuf,

    #[command(flatten)]
    pub canvas: CanvasArgs,

    /// TOML config file [default: ./homereel.toml when present]
    #[arg(short, long, env = "HOMEREEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// ffprobe executable [default: ffprobe]
    #[arg(long, env = "HOMEREEL_FFPROBE")]
    pub ffprobe: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
