use std::path::Path;
use std::sync::Arc;

use homereel::adapters::{LocalFsAdapter, MockEncodeAdapter, MockLogAdapter, MockProbeAdapter};
use homereel::app::container::{AppContainer, DefaultAppContainer};
use homereel::ports::FsPort;
use homereel::*;
use tempfile::TempDir;

/// Test utilities for pipeline runs over temporary folders
mod test_utils {
    use super::*;

    /// Ten timestamped clips whose bytes spell their position
    pub fn create_clips(dir: &Path, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                let name = format!("20200717_1300{:02}_clip.mp4", i);
                std::fs::write(dir.join(&name), format!("[{}]", i)).unwrap();
                name
            })
            .collect()
    }

    pub fn settings(input: &Path, layer: PartialSettings) -> Settings {
        Settings::from_layers([PartialSettings {
            input_dir: Some(input.to_path_buf()),
            ..layer
        }])
        .unwrap()
    }

    pub fn container(probe: MockProbeAdapter, encode: Arc<MockEncodeAdapter>) -> DefaultAppContainer {
        DefaultAppContainer::with_ports(
            Arc::new(probe),
            encode,
            Arc::new(LocalFsAdapter::new()),
            Arc::new(MockLogAdapter::new()),
        )
    }

    pub fn final_contents(settings: &Settings) -> String {
        std::fs::read_to_string(settings.final_output_path()).unwrap()
    }
}

use test_utils::*;

#[tokio::test]
async fn test_one_corrupt_clip_among_ten() {
    let dir = TempDir::new().unwrap();
    let names = create_clips(dir.path(), 10);
    let settings = settings(dir.path(), PartialSettings::default());

    let probe = MockProbeAdapter::new().failing_on(&names[3]);
    let container = container(probe, Arc::new(MockEncodeAdapter::new()));
    container.fs_port().prepare_directory(&settings.output_dir).await.unwrap();

    let report = container.batch_interactor().run(&settings).await.unwrap();

    assert_eq!(report.count(ClipStatus::Succeeded), 9);
    assert_eq!(report.count(ClipStatus::Failed), 1);
    assert_eq!(report.failed_clips().next().unwrap().file_name, names[3]);

    let expected: String = (0..10).filter(|i| *i != 3).map(|i| format!("[{}]", i)).collect();
    assert_eq!(final_contents(&settings), expected);
    assert_eq!(
        report.concatenation,
        ConcatOutcome::Combined {
            output: settings.final_output_path(),
            clip_count: 9
        }
    );
}

#[tokio::test]
async fn test_rerun_with_retained_outputs_is_idempotent() {
    let dir = TempDir::new().unwrap();
    create_clips(dir.path(), 3);
    let settings = settings(
        dir.path(),
        PartialSettings {
            resume: Some(true),
            keep_intermediates: Some(true),
            ..Default::default()
        },
    );
    std::fs::create_dir_all(&settings.output_dir).unwrap();

    let encode = Arc::new(MockEncodeAdapter::new());
    let container = container(MockProbeAdapter::new(), Arc::clone(&encode));

    let first = container.batch_interactor().run(&settings).await.unwrap();
    let combined = final_contents(&settings);
    let second = container.batch_interactor().run(&settings).await.unwrap();

    assert_eq!(first.count(ClipStatus::Succeeded), 3);
    assert_eq!(second.count(ClipStatus::Skipped), 3);
    assert_eq!(encode.jobs().len(), 3);
    assert_eq!(final_contents(&settings), combined);
    assert_eq!(combined, "[0][1][2]");
}

#[tokio::test]
async fn test_cleanup_leaves_only_final_video() {
    let dir = TempDir::new().unwrap();
    create_clips(dir.path(), 2);
    let settings = settings(
        dir.path(),
        PartialSettings {
            output_video: Some("family".to_string()),
            ..Default::default()
        },
    );

    let container = container(MockProbeAdapter::new(), Arc::new(MockEncodeAdapter::new()));
    container.fs_port().prepare_directory(&settings.output_dir).await.unwrap();
    let report = container.batch_interactor().run(&settings).await.unwrap();

    assert!(report.cleanup.unwrap().is_clean());
    let remaining: Vec<_> = std::fs::read_dir(&settings.output_dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(remaining, ["family.mp4"]);
}

#[tokio::test]
async fn test_failed_encodes_leave_nothing_to_combine() {
    let dir = TempDir::new().unwrap();
    let names = create_clips(dir.path(), 2);
    let settings = settings(dir.path(), PartialSettings::default());

    let encode = MockEncodeAdapter::new().failing_on(&names[0]).failing_on(&names[1]);
    let container = container(MockProbeAdapter::new(), Arc::new(encode));
    container.fs_port().prepare_directory(&settings.output_dir).await.unwrap();
    let report = container.batch_interactor().run(&settings).await.unwrap();

    assert_eq!(report.count(ClipStatus::Failed), 2);
    assert_eq!(report.concatenation, ConcatOutcome::NothingToCombine);
    assert!(!settings.final_output_path().exists());
}

#[tokio::test]
async fn test_prepare_directory_clears_previous_run() {
    let dir = TempDir::new().unwrap();
    create_clips(dir.path(), 1);
    let settings = settings(dir.path(), PartialSettings::default());
    std::fs::create_dir_all(&settings.output_dir).unwrap();
    std::fs::write(settings.output_dir.join("stale.mp4"), "stale").unwrap();

    let container = container(MockProbeAdapter::new(), Arc::new(MockEncodeAdapter::new()));
    container.fs_port().prepare_directory(&settings.output_dir).await.unwrap();
    container.batch_interactor().run(&settings).await.unwrap();

    assert_eq!(final_contents(&settings), "[0]");
}
