//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::config::{PartialSettings, Settings};
use crate::domain::model::TargetCanvas;

/// Build run settings following precedence: CLI > Env > File > Defaults.
///
/// `cli_layer` already carries environment values, since clap resolves
/// `HOMEREEL_*` variables for every flag left off the command line.
pub fn initialize_settings(cli_layer: PartialSettings, config_file: Option<&Path>) -> Result<Settings> {
    info!("Initializing configuration hierarchy");

    let file_layer = TomlConfigAdapter::load_layer(config_file).context("Failed to load configuration file")?;
    let settings = Settings::from_layers([cli_layer, file_layer]).context("Invalid configuration")?;

    debug!(?settings, "Configuration resolved");
    info!(
        "Input: {}, output: {}, canvas {}x{} @ {} fps",
        settings.input_dir.display(),
        settings.final_output_path().display(),
        settings.canvas.width,
        settings.canvas.height,
        settings.canvas.fps
    );
    Ok(settings)
}

/// Resolve the canvas and ffprobe path for commands that don't scan a folder
pub fn initialize_canvas(
    cli_layer: PartialSettings,
    config_file: Option<&Path>,
) -> Result<(TargetCanvas, String)> {
    let file_layer = TomlConfigAdapter::load_layer(config_file).context("Failed to load configuration file")?;
    let merged = PartialSettings::merge([cli_layer, file_layer]);
    let canvas = merged.canvas().context("Invalid configuration")?;
    let ffprobe = merged.ffprobe_path.unwrap_or_else(|| "ffprobe".to_string());
    Ok((canvas, ffprobe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_layer_overrides_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("homereel.toml");
        std::fs::write(
            &config,
            format!(
                "[homereel]\ninput_dir = {:?}\nwidth = 640\nfps = 24\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let cli = PartialSettings {
            width: Some(1280),
            ..Default::default()
        };
        let settings = initialize_settings(cli, Some(&config)).unwrap();

        assert_eq!(settings.input_dir, dir.path());
        assert_eq!(settings.canvas.width, 1280);
        assert_eq!(settings.canvas.fps, 24);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let dir = TempDir::new().unwrap();
        let cli = PartialSettings {
            input_dir: Some(dir.path().to_path_buf()),
            ts_fontsize: Some(0),
            ..Default::default()
        };
        let err = initialize_settings(cli, Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration file"));

        let err = initialize_canvas(
            PartialSettings {
                ts_fontsize: Some(0),
                ..Default::default()
            },
            None,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("ts_fontsize"));
    }
}
