use std::sync::Arc;

use crate::adapters::{FfmpegAdapter, FfprobeAdapter, LocalFsAdapter, TracingLogAdapter};
use crate::app::batch_interactor::BatchInteractor;
use crate::config::Settings;
use crate::ports::{EncodePort, FsPort, LogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn fs_port(&self) -> Arc<dyn FsPort>;
}

pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
    fs_port: Arc<dyn FsPort>,
}

impl DefaultAppContainer {
    /// Wire the ffmpeg-backed adapters for a real run
    pub fn new(settings: &Settings) -> Self {
        Self::with_ports(
            Arc::new(FfprobeAdapter::new(settings.ffprobe_path.clone())),
            Arc::new(FfmpegAdapter::new(settings.ffmpeg_path.clone())),
            Arc::new(LocalFsAdapter::new()),
            Arc::new(TracingLogAdapter::new()),
        )
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let batch_interactor = Arc::new(BatchInteractor::new(
            probe_port,
            encode_port,
            Arc::clone(&fs_port),
            log_port,
        ));

        Self {
            batch_interactor,
            fs_port,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn fs_port(&self) -> Arc<dyn FsPort> {
        Arc::clone(&self.fs_port)
    }
}
