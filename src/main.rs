//! homereel CLI
//!
//! Normalizes a folder of home videos and combines them into one file.
//!
//! # Usage
//!
//! ```bash
//! homereel run --input-dir ~/Videos/2020 --output-video "summer 2020"
//! homereel inspect ~/Videos/2020/20200717_135135.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use homereel::cli::{commands, Cli, Commands};
use homereel::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logging_config());

    info!("Starting homereel");

    match cli.command {
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args).await?;
        }
    }

    Ok(())
}
