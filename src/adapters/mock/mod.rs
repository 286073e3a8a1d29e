// Mock adapters - In-memory ports for pipeline tests without ffmpeg

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::file_name_of;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Probe adapter answering from a table keyed by file name.
/// Unknown files report a 1920x1080 H.264 stream with one audio track.
#[derive(Debug, Default)]
pub struct MockProbeAdapter {
    media: HashMap<String, (Vec<VideoStreamInfo>, usize)>,
    failures: HashSet<String>,
    probed: Mutex<Vec<PathBuf>>,
}

impl MockProbeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a single video stream for `file_name`
    pub fn with_stream(mut self, file_name: &str, stream: VideoStreamInfo) -> Self {
        self.media.insert(file_name.to_string(), (vec![stream], 1));
        self
    }

    /// Report audio only for `file_name`
    pub fn without_video(mut self, file_name: &str) -> Self {
        self.media.insert(file_name.to_string(), (Vec::new(), 1));
        self
    }

    /// Fail probing `file_name`
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failures.insert(file_name.to_string());
        self
    }

    /// Paths probed so far, in call order
    pub fn probed(&self) -> Vec<PathBuf> {
        lock(&self.probed).clone()
    }

    fn default_stream() -> Result<VideoStreamInfo, DomainError> {
        VideoStreamInfo::new(0, "h264".to_string(), 1920, 1080)
    }
}

#[async_trait]
impl ProbePort for MockProbeAdapter {
    async fn probe(&self, file_path: &Path) -> Result<MediaInfo, DomainError> {
        lock(&self.probed).push(file_path.to_path_buf());

        let name = file_name_of(file_path);
        if self.failures.contains(&name) {
            return Err(DomainError::ProbeFailure {
                path: file_path.display().to_string(),
                message: "injected probe failure".to_string(),
            });
        }

        let (streams, audio) = match self.media.get(&name) {
            Some((streams, audio)) => (streams.clone(), *audio),
            None => (vec![Self::default_stream()?], 1),
        };
        Ok(MediaInfo::new(file_path.to_path_buf(), streams, audio))
    }
}

/// Encode adapter that copies bytes instead of transcoding.
///
/// `encode` writes the input file's contents to the job output and
/// `concatenate` appends every manifest entry's contents, in order, to the
/// combined output. That keeps ordering and idempotence observable on disk.
#[derive(Debug, Default)]
pub struct MockEncodeAdapter {
    encode_failures: HashSet<String>,
    fail_concat: bool,
    jobs: Mutex<Vec<EncodeJob>>,
    manifests: Mutex<Vec<ConcatManifest>>,
}

impl MockEncodeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail encoding the clip whose input file name is `file_name`
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.encode_failures.insert(file_name.to_string());
        self
    }

    /// Fail every concatenation
    pub fn failing_concat(mut self) -> Self {
        self.fail_concat = true;
        self
    }

    /// Encode jobs received so far, in call order
    pub fn jobs(&self) -> Vec<EncodeJob> {
        lock(&self.jobs).clone()
    }

    /// Manifests received by `concatenate`, parsed at call time
    pub fn manifests(&self) -> Vec<ConcatManifest> {
        lock(&self.manifests).clone()
    }
}

#[async_trait]
impl EncodePort for MockEncodeAdapter {
    async fn encode(&self, job: &EncodeJob) -> Result<(), DomainError> {
        lock(&self.jobs).push(job.clone());

        let fail = |message: String| DomainError::EncodeFailure {
            path: job.input.display().to_string(),
            message,
        };

        if self.encode_failures.contains(&file_name_of(&job.input)) {
            return Err(fail("injected encode failure".to_string()));
        }
        if !job.overwrite && job.output.exists() {
            return Err(fail(format!("{} already exists", job.output.display())));
        }

        let bytes = tokio::fs::read(&job.input).await.map_err(|e| fail(e.to_string()))?;
        tokio::fs::write(&job.output, bytes).await.map_err(|e| fail(e.to_string()))
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError> {
        let fail = |message: String| DomainError::ConcatenationFailure {
            path: output.display().to_string(),
            message,
        };

        let contents = tokio::fs::read_to_string(manifest)
            .await
            .map_err(|e| fail(e.to_string()))?;
        let parsed = ConcatManifest::parse(&contents);
        lock(&self.manifests).push(parsed.clone());

        if self.fail_concat {
            return Err(fail("injected concatenation failure".to_string()));
        }

        let mut combined = Vec::new();
        for entry in parsed.entries() {
            let bytes = tokio::fs::read(entry).await.map_err(|e| fail(e.to_string()))?;
            combined.extend_from_slice(&bytes);
        }
        tokio::fs::write(output, combined).await.map_err(|e| fail(e.to_string()))
    }
}

/// Log level captured by `MockLogAdapter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggedLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Log adapter that records every message
#[derive(Debug, Default)]
pub struct MockLogAdapter {
    entries: Mutex<Vec<(LoggedLevel, String)>>,
}

impl MockLogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at `level`, in order
    pub fn messages(&self, level: LoggedLevel) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .filter(|(logged, _)| *logged == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn record(&self, level: LoggedLevel, message: &str) {
        lock(&self.entries).push((level, message.to_string()));
    }
}

#[async_trait]
impl LogPort for MockLogAdapter {
    async fn info(&self, message: &str) {
        self.record(LoggedLevel::Info, message);
    }

    async fn warn(&self, message: &str) {
        self.record(LoggedLevel::Warn, message);
    }

    async fn error(&self, message: &str) {
        self.record(LoggedLevel::Error, message);
    }

    async fn debug(&self, message: &str) {
        self.record(LoggedLevel::Debug, message);
    }
}
