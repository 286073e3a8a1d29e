// Cleanup interactor - Removes intermediates after a successful combine

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Best-effort removal of the manifest and processed clips
pub struct CleanupInteractor {
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl CleanupInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self { fs_port, log_port }
    }

    /// Delete `manifest` if present and every processed path except
    /// `final_output`. Failures are recorded and never stop the sweep.
    pub async fn cleanup(
        &self,
        manifest: &Path,
        processed: &[PathBuf],
        final_output: &Path,
    ) -> CleanupReport {
        let mut report = CleanupReport::default();

        match self.fs_port.file_exists(manifest).await {
            Ok(true) => self.delete(manifest, &mut report).await,
            Ok(false) => {}
            Err(e) => self.record_failure(e, &mut report).await,
        }

        for path in processed.iter().filter(|path| path.as_path() != final_output) {
            self.delete(path, &mut report).await;
        }

        self.log_port
            .info(&format!(
                "Cleanup removed {} file(s), {} failure(s)",
                report.deleted.len(),
                report.failures.len()
            ))
            .await;
        report
    }

    async fn delete(&self, path: &Path, report: &mut CleanupReport) {
        match self.fs_port.delete_file(path).await {
            Ok(()) => {
                self.log_port.debug(&format!("Deleted {}", path.display())).await;
                report.deleted.push(path.to_path_buf());
            }
            Err(e) => self.record_failure(e, report).await,
        }
    }

    async fn record_failure(&self, error: DomainError, report: &mut CleanupReport) {
        self.log_port.warn(&error.to_string()).await;
        report.failures.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LocalFsAdapter, MockLogAdapter};
    use crate::adapters::mock::LoggedLevel;
    use tempfile::TempDir;

    fn interactor(log: Arc<MockLogAdapter>) -> CleanupInteractor {
        CleanupInteractor::new(Arc::new(LocalFsAdapter::new()), log)
    }

    #[tokio::test]
    async fn test_cleanup_keeps_final_output() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("videos.txt");
        let final_output = dir.path().join("home_videos.mp4");
        let clips = vec![dir.path().join("a.mp4"), dir.path().join("b.mp4")];
        for path in clips.iter().chain([&manifest, &final_output]) {
            std::fs::write(path, b"x").unwrap();
        }

        let mut processed = clips.clone();
        processed.push(final_output.clone());

        let report = interactor(Arc::new(MockLogAdapter::new()))
            .cleanup(&manifest, &processed, &final_output)
            .await;

        assert!(report.is_clean());
        assert_eq!(report.deleted.len(), 3);
        assert!(!manifest.exists());
        assert!(clips.iter().all(|clip| !clip.exists()));
        assert!(final_output.exists());
    }

    #[tokio::test]
    async fn test_cleanup_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("videos.txt");
        let missing = dir.path().join("gone.mp4");
        let present = dir.path().join("z.mp4");
        std::fs::write(&present, b"z").unwrap();

        let log = Arc::new(MockLogAdapter::new());
        let report = interactor(Arc::clone(&log))
            .cleanup(&manifest, &[missing, present.clone()], &dir.path().join("final.mp4"))
            .await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.deleted, vec![present.clone()]);
        assert!(!present.exists());
        assert_eq!(log.messages(LoggedLevel::Warn).len(), 1);
    }
}
