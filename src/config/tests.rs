// Unit tests for configuration layering and validation

use super::*;
use tempfile::TempDir;

fn layer_for(dir: &Path) -> PartialSettings {
    PartialSettings {
        input_dir: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_defaults_applied() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::from_layers([layer_for(dir.path())]).unwrap();

    assert_eq!(settings.output_dir, dir.path().join("output"));
    assert_eq!(settings.final_output_file, "home_videos.mp4");
    assert_eq!(settings.canvas.width, 1920);
    assert_eq!(settings.canvas.height, 1080);
    assert_eq!(settings.canvas.fps, 30);
    assert_eq!(settings.canvas.overlay.duration_secs, 5);
    assert_eq!(settings.canvas.overlay.font_size, 60);
    assert_eq!(settings.canvas.overlay.padding, 30);
    assert!(!settings.resume);
    assert_eq!(settings.final_output_path(), dir.path().join("output").join("home_videos.mp4"));
    assert_eq!(settings.manifest_path(), dir.path().join("output").join("videos.txt"));
}

#[test]
fn test_higher_layer_wins() {
    let dir = TempDir::new().unwrap();
    let cli = PartialSettings {
        width: Some(1280),
        ..layer_for(dir.path())
    };
    let file = PartialSettings {
        width: Some(640),
        height: Some(720),
        ..Default::default()
    };

    let settings = Settings::from_layers([cli, file]).unwrap();
    assert_eq!(settings.canvas.width, 1280);
    assert_eq!(settings.canvas.height, 720);
}

#[test]
fn test_mp4_suffix_appended() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::from_layers([PartialSettings {
        output_video: Some("summer 2020".to_string()),
        ..layer_for(dir.path())
    }])
    .unwrap();
    assert_eq!(settings.final_output_file, "summer 2020.mp4");

    let settings = Settings::from_layers([PartialSettings {
        output_video: Some("Family.MP4".to_string()),
        ..layer_for(dir.path())
    }])
    .unwrap();
    assert_eq!(settings.final_output_file, "Family.MP4");
}

#[test]
fn test_invalid_filename_rejected() {
    let dir = TempDir::new().unwrap();
    let result = Settings::from_layers([PartialSettings {
        output_video: Some("bad/name?.mp4".to_string()),
        ..layer_for(dir.path())
    }]);
    assert!(matches!(result, Err(DomainError::Configuration(_))));
}

#[test]
fn test_non_positive_numbers_rejected() {
    let dir = TempDir::new().unwrap();
    for layer in [
        PartialSettings { fps: Some(0), ..layer_for(dir.path()) },
        PartialSettings { width: Some(-1920), ..layer_for(dir.path()) },
        PartialSettings { ts_padding: Some(0), ..layer_for(dir.path()) },
    ] {
        let err = Settings::from_layers([layer]).unwrap_err();
        assert!(err.to_string().contains("Must be a number greater than 0"));
    }
}

#[test]
fn test_missing_input_directory_rejected() {
    let dir = TempDir::new().unwrap();
    let result = Settings::from_layers([layer_for(&dir.path().join("missing"))]);
    assert!(matches!(result, Err(DomainError::Configuration(_))));

    assert!(Settings::from_layers([PartialSettings::default()]).is_err());
}

#[test]
fn test_relative_output_directory_rejected() {
    let dir = TempDir::new().unwrap();
    let result = Settings::from_layers([PartialSettings {
        output_dir: Some(PathBuf::from("relative/output")),
        ..layer_for(dir.path())
    }]);
    assert!(matches!(result, Err(DomainError::Configuration(_))));
}

#[test]
fn test_canvas_without_input_directory() {
    let merged = PartialSettings::merge([PartialSettings {
        height: Some(720),
        ..Default::default()
    }]);
    let canvas = merged.canvas().unwrap();
    assert_eq!((canvas.width, canvas.height, canvas.fps), (1920, 720, 30));
}

#[test]
fn test_output_directory_equal_to_input_rejected() {
    let dir = TempDir::new().unwrap();
    let result = Settings::from_layers([PartialSettings {
        output_dir: Some(dir.path().to_path_buf()),
        resume: Some(true),
        ..layer_for(dir.path())
    }]);
    let err = result.unwrap_err();
    assert!(matches!(err, DomainError::Configuration(_)));
    assert!(err.to_string().contains("must not be the input directory"));

    let dotted = dir.path().join("sub").join("..");
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let result = Settings::from_layers([PartialSettings {
        output_dir: Some(dotted),
        ..layer_for(dir.path())
    }]);
    assert!(matches!(result, Err(DomainError::Configuration(_))));
}

#[test]
fn test_output_directory_containing_input_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("videos");
    std::fs::create_dir(&input).unwrap();

    let result = Settings::from_layers([PartialSettings {
        output_dir: Some(dir.path().to_path_buf()),
        ..layer_for(&input)
    }]);
    assert!(matches!(result, Err(DomainError::Configuration(_))));

    let sibling = Settings::from_layers([PartialSettings {
        output_dir: Some(dir.path().join("processed")),
        ..layer_for(&input)
    }])
    .unwrap();
    assert_eq!(sibling.output_dir, dir.path().join("processed"));
}
