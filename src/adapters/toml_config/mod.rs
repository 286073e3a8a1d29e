// TOML config adapter - Loads a configuration layer from a TOML file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::config::PartialSettings;
use crate::domain::errors::*;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "homereel.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    homereel: PartialSettings,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse the `[homereel]` table of a TOML document
    pub fn parse(toml_content: &str) -> Result<PartialSettings, DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::Configuration(format!("Failed to parse TOML config: {}", e)))?;
        Ok(parsed.homereel)
    }

    /// Load a configuration layer from a file that must exist
    pub fn load(file_path: &Path) -> Result<PartialSettings, DomainError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            DomainError::Configuration(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        info!("Loading configuration from: {}", file_path.display());
        Self::parse(&content)
    }

    /// Load an explicitly requested file, or the default file when present.
    /// Returns an empty layer when neither applies.
    pub fn load_layer(explicit: Option<&Path>) -> Result<PartialSettings, DomainError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(PartialSettings::default())
                }
            }
        }
    }
}
