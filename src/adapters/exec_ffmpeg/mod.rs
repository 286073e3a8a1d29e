//! FFmpeg execution adapter
//!
//! Encodes clips and concatenates them by running `ffmpeg` as a child
//! process. Each call blocks the caller until the process exits.

use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Lines of ffmpeg stderr kept in error messages
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    ffmpeg_path: String,
}

impl FfmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<(), String> {
        debug!("Running {} {:?}", self.ffmpeg_path, args);

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| format!("failed to run {}: {}", self.ffmpeg_path, e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!("{}\n{}", output.status, stderr_tail(&stderr)))
        }
    }
}

/// Arguments for one normalizing encode
pub fn build_encode_args(job: &EncodeJob) -> Vec<OsString> {
    let profile = &job.profile;
    let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-nostdin".into()];

    args.push(if job.overwrite { "-y" } else { "-n" }.into());
    args.push("-i".into());
    args.push(job.input.clone().into_os_string());

    if !job.plan.is_empty() {
        args.push("-vf".into());
        args.push(job.plan.to_filtergraph().into());
    }

    let crf = profile.crf.to_string();
    let video_map = format!("0:{}", job.video_stream_index);
    // audio is optional: "0:a?" maps it only when the source has one
    for arg in [
        "-map", video_map.as_str(),
        "-map", "0:a?",
        "-c:v", profile.video_codec.as_str(),
        "-crf", crf.as_str(),
        "-preset", profile.preset.as_str(),
        "-pix_fmt", profile.pixel_format.as_str(),
        "-bsf:v", profile.video_bitstream_filter.as_str(),
        "-c:a", profile.audio_codec.as_str(),
        "-b:a", profile.audio_bitrate.as_str(),
        "-f", profile.container.as_str(),
    ] {
        args.push(arg.into());
    }

    args.push(job.output.clone().into_os_string());
    args
}

/// Arguments for a stream-copy concatenation of a manifest
pub fn build_concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-y", "-f", "concat", "-safe", "0", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(manifest.as_os_str().to_owned());
    args.push("-c".into());
    args.push("copy".into());
    args.push(output.as_os_str().to_owned());
    args
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[async_trait]
impl EncodePort for FfmpegAdapter {
    async fn encode(&self, job: &EncodeJob) -> Result<(), DomainError> {
        self.run(build_encode_args(job))
            .await
            .map_err(|message| DomainError::EncodeFailure {
                path: job.input.display().to_string(),
                message,
            })
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError> {
        self.run(build_concat_args(manifest, output))
            .await
            .map_err(|message| DomainError::ConcatenationFailure {
                path: output.display().to_string(),
                message,
            })
    }
}
