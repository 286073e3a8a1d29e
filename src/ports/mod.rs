// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file and return its stream metadata
    async fn probe(&self, file_path: &Path) -> Result<MediaInfo, DomainError>;
}

/// Port for the external encode engine
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Apply a transform plan to one clip and write it with the fixed profile.
    /// Audio is mapped only when present in the source.
    async fn encode(&self, job: &EncodeJob) -> Result<(), DomainError>;

    /// Stream-copy every file listed in the manifest into one container
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// List regular files directly inside a directory, sorted by file name
    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Write (or replace) a text file
    async fn write_file(&self, file_path: &Path, contents: &str) -> Result<(), DomainError>;

    /// Delete file
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Empty a directory if it exists, then make sure it exists.
    /// Returns one message per entry that could not be removed.
    async fn prepare_directory(&self, dir_path: &Path) -> Result<Vec<String>, DomainError>;
}

/// Port for run-time logging from the application layer
#[async_trait]
pub trait LogPort: Send + Sync {
    async fn info(&self, message: &str);

    async fn warn(&self, message: &str);

    async fn error(&self, message: &str);

    async fn debug(&self, message: &str);
}
