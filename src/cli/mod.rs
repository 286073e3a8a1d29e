//! CLI module for homereel
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

pub mod args;
pub mod commands;

/// homereel home-video normalizer
///
/// Normalizes a folder of phone and camera clips to one canvas, stamps the
/// recording date and time from each filename, and combines them into a
/// single video.
#[derive(Parser, Debug)]
#[command(name = "homereel")]
#[command(about = "Normalize home videos and combine them into one file")]
#[command(version)]
pub struct Cli {
    /// Logging level (RUST_LOG overrides)
    #[arg(long, default_value = "info", global = true, env = "HOMEREEL_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log output format: pretty, compact or json
    #[arg(long, default_value = "compact", global = true, env = "HOMEREEL_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize every video in a folder and combine them
    Run(args::RunArgs),
    /// Show how a single video would be normalized
    Inspect(args::InspectArgs),
}
