// Local filesystem adapter - File system operations on the host

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }

    fn remove_entry(path: &Path) -> std::io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(file_path.exists())
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir_path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                DomainError::FsFailure(format!("Failed to list {}: {}", dir_path.display(), e))
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    async fn write_file(&self, file_path: &Path, contents: &str) -> Result<(), DomainError> {
        fs::write(file_path, contents).map_err(|e| {
            DomainError::FsFailure(format!("Failed to write {}: {}", file_path.display(), e))
        })
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        fs::remove_file(file_path).map_err(|e| DomainError::CleanupFailure {
            path: file_path.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn prepare_directory(&self, dir_path: &Path) -> Result<Vec<String>, DomainError> {
        let mut failures = Vec::new();

        if dir_path.is_dir() {
            let entries = fs::read_dir(dir_path).map_err(|e| {
                DomainError::FsFailure(format!("Failed to read {}: {}", dir_path.display(), e))
            })?;

            for entry in entries.flatten() {
                let path = entry.path();
                if let Err(e) = Self::remove_entry(&path) {
                    warn!("Failed to delete {}: {}", path.display(), e);
                    failures.push(format!("{}: {}", path.display(), e));
                }
            }
        }

        info!("Preparing output directory {}", dir_path.display());
        fs::create_dir_all(dir_path).map_err(|e| {
            DomainError::Configuration(format!(
                "Failed to create output directory {}: {}",
                dir_path.display(),
                e
            ))
        })?;

        Ok(failures)
    }
}
