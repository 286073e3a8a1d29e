// Batch interactor - Orchestrates the scan, process, concatenate, cleanup pipeline

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::cleanup_interactor::CleanupInteractor;
use crate::config::Settings;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::domain::timestamp::parse_timestamp;
use crate::ports::*;
use crate::utils::path::{file_name_of, is_mp4, is_supported_video};

/// Interactor for the whole normalize-and-combine run
pub struct BatchInteractor {
    probe_port: Arc<dyn ProbePort>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    cleanup: CleanupInteractor,
}

impl BatchInteractor {
    /// Create new batch interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let cleanup = CleanupInteractor::new(Arc::clone(&fs_port), Arc::clone(&log_port));
        Self {
            probe_port,
            encode_port,
            fs_port,
            log_port,
            cleanup,
        }
    }

    /// Run the pipeline once.
    ///
    /// Per-clip errors are folded into the report. Only a failure to list the
    /// input or output directory aborts the run.
    pub async fn run(&self, settings: &Settings) -> Result<BatchReport, DomainError> {
        let sources = self.scan(&settings.input_dir).await?;
        self.log_port
            .info(&format!(
                "Found {} video(s) in {}",
                sources.len(),
                settings.input_dir.display()
            ))
            .await;

        let mut clips = Vec::with_capacity(sources.len());
        for source in &sources {
            clips.push(self.process_clip(settings, source).await);
        }

        let (concatenation, processed) = self.concatenate(settings).await?;

        let cleanup = match &concatenation {
            ConcatOutcome::Combined { .. } if !settings.keep_intermediates => Some(
                self.cleanup
                    .cleanup(&settings.manifest_path(), &processed, &settings.final_output_path())
                    .await,
            ),
            ConcatOutcome::Combined { .. } => {
                self.log_port.info("Keeping intermediate files").await;
                None
            }
            _ => None,
        };

        Ok(BatchReport {
            clips,
            concatenation,
            cleanup,
        })
    }

    /// Supported videos directly inside the input directory, sorted by name
    async fn scan(&self, input_dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let files = self.fs_port.list_files(input_dir).await?;
        Ok(files.into_iter().filter(|path| is_supported_video(path)).collect())
    }

    async fn process_clip(&self, settings: &Settings, source: &Path) -> ClipReport {
        let file_name = file_name_of(source);
        let output = settings.output_dir.join(&file_name);

        if output == settings.final_output_path() {
            let collision = DomainError::OutputNameCollision {
                path: source.display().to_string(),
            };
            return self.fail_clip(file_name, collision).await;
        }

        match self.fs_port.file_exists(&output).await {
            Ok(true) => {
                self.log_port
                    .info(&format!("Skipping {}: already processed", file_name))
                    .await;
                return ClipReport::skipped(file_name);
            }
            Ok(false) => {}
            Err(e) => return self.fail_clip(file_name, e).await,
        }

        self.log_port.info(&format!("Processing {}", file_name)).await;
        match self.normalize(settings, source, &file_name, output).await {
            Ok((orientation, overlay)) => {
                self.log_port
                    .info(&format!("Processed {} ({})", file_name, orientation))
                    .await;
                ClipReport::succeeded(file_name, orientation, overlay)
            }
            Err(e) => self.fail_clip(file_name, e).await,
        }
    }

    /// Probe, classify, plan and encode one clip
    async fn normalize(
        &self,
        settings: &Settings,
        source: &Path,
        file_name: &str,
        output: PathBuf,
    ) -> Result<(Orientation, bool), DomainError> {
        let media = self.probe_port.probe(source).await?;
        let stream = media.require_video_stream()?;
        let orientation = OrientationClassifier::classify_stream(stream);
        self.log_port
            .debug(&format!(
                "{}: {}x{} rotation {} displaymatrix {} -> {}",
                file_name,
                stream.width,
                stream.height,
                stream.rotation_degrees(),
                stream.displaymatrix_degrees(),
                orientation
            ))
            .await;

        let timestamp = match parse_timestamp(file_name) {
            Ok(timestamp) => Some(timestamp),
            Err(e) if settings.require_timestamp => return Err(e),
            Err(e) => {
                self.log_port
                    .warn(&format!("{}; timestamp overlay omitted", e))
                    .await;
                None
            }
        };

        let plan = TransformPlanner::plan(orientation, &settings.canvas, timestamp.as_ref());
        let job = EncodeJob {
            input: source.to_path_buf(),
            video_stream_index: stream.index,
            output,
            plan,
            profile: EncodeProfile::default(),
            overwrite: true,
        };
        self.encode_port.encode(&job).await?;

        Ok((orientation, timestamp.is_some()))
    }

    async fn fail_clip(&self, file_name: String, error: DomainError) -> ClipReport {
        self.log_port
            .error(&format!("Failed to process {}: {}", file_name, error))
            .await;
        ClipReport::failed(file_name, &error)
    }

    /// Combine every processed `.mp4` except the final artifact.
    /// Returns the outcome and the clips fed to the concat step.
    async fn concatenate(
        &self,
        settings: &Settings,
    ) -> Result<(ConcatOutcome, Vec<PathBuf>), DomainError> {
        let final_output = settings.final_output_path();
        let manifest_path = settings.manifest_path();

        let mut processed = Vec::new();
        for path in self.fs_port.list_files(&settings.output_dir).await? {
            if path == final_output || path == manifest_path {
                continue;
            }
            if is_mp4(&path) {
                processed.push(path);
            } else {
                self.log_port
                    .warn(&format!(
                        "Excluding {} from the combined video: not an .mp4 file",
                        file_name_of(&path)
                    ))
                    .await;
            }
        }

        if processed.is_empty() {
            self.log_port.info("No videos to combine").await;
            return Ok((ConcatOutcome::NothingToCombine, processed));
        }

        let manifest = ConcatManifest::new(processed);
        if let Err(e) = self.fs_port.write_file(&manifest_path, &manifest.render()).await {
            return Ok((self.concat_failed(e).await, Vec::new()));
        }

        self.log_port
            .info(&format!(
                "Combining {} video(s) into {}",
                manifest.entries().len(),
                final_output.display()
            ))
            .await;

        match self.encode_port.concatenate(&manifest_path, &final_output).await {
            Ok(()) => {
                let clip_count = manifest.entries().len();
                self.log_port
                    .info(&format!("Created {}", final_output.display()))
                    .await;
                Ok((
                    ConcatOutcome::Combined {
                        output: final_output,
                        clip_count,
                    },
                    manifest.entries().to_vec(),
                ))
            }
            Err(e) => Ok((self.concat_failed(e).await, Vec::new())),
        }
    }

    async fn concat_failed(&self, error: DomainError) -> ConcatOutcome {
        self.log_port
            .error(&format!("{}; intermediate files left in place", error))
            .await;
        ConcatOutcome::Failed {
            message: error.to_string(),
        }
    }
}
