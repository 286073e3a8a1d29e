//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::FfprobeAdapter;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::args::{InspectArgs, RunArgs};
use crate::config::{PartialSettings, Settings};
use crate::config_initialization::{initialize_canvas, initialize_settings};
use crate::domain::model::*;
use crate::domain::rules::{OrientationClassifier, TransformPlanner};
use crate::domain::timestamp::{parse_timestamp, ClipTimestamp};
use crate::ports::ProbePort;
use crate::utils::path::file_name_of;

/// Execute the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let settings = initialize_settings(args.to_layer(), args.config.as_deref())?;
    let container = DefaultAppContainer::new(&settings);

    prepare_output_directory(&container, &settings).await?;

    let report = container
        .batch_interactor()
        .run(&settings)
        .await
        .context("Batch run aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    info!("homereel completed");
    Ok(())
}

async fn prepare_output_directory(container: &DefaultAppContainer, settings: &Settings) -> Result<()> {
    if settings.resume {
        info!("Resuming in {}", settings.output_dir.display());
        return std::fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!("Failed to create output directory {}", settings.output_dir.display())
        });
    }

    let failures = container
        .fs_port()
        .prepare_directory(&settings.output_dir)
        .await
        .context("Failed to prepare output directory")?;
    if !failures.is_empty() {
        warn!("{} stale output entries could not be removed", failures.len());
    }
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!(
        "Processed {} video(s): {} succeeded, {} skipped, {} failed",
        report.clips.len(),
        report.count(ClipStatus::Succeeded),
        report.count(ClipStatus::Skipped),
        report.count(ClipStatus::Failed)
    );
    for clip in report.failed_clips() {
        println!("  failed: {} ({})", clip.file_name, clip.error.as_deref().unwrap_or("unknown error"));
    }

    match &report.concatenation {
        ConcatOutcome::Combined { output, clip_count } => {
            println!("Combined {} video(s) into {}", clip_count, output.display())
        }
        ConcatOutcome::NothingToCombine => println!("No videos to combine"),
        ConcatOutcome::Failed { message } => {
            println!("Combining failed, intermediate files kept: {}", message)
        }
    }

    if let Some(cleanup) = &report.cleanup {
        println!("Removed {} intermediate file(s)", cleanup.deleted.len());
        for failure in &cleanup.failures {
            println!("  not removed: {}", failure);
        }
    }
}

/// What `inspect` reports about one video
#[derive(Debug, Serialize)]
struct InspectReport {
    file: String,
    width: u32,
    height: u32,
    rotation: i32,
    displaymatrix: i32,
    has_audio: bool,
    orientation: Orientation,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<ClipTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_error: Option<String>,
    filtergraph: String,
    plan: TransformPlan,
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs) -> Result<()> {
    let cli_layer = PartialSettings {
        ffprobe_path: args.ffprobe.clone(),
        ..args.canvas.to_layer()
    };
    let (canvas, ffprobe) = initialize_canvas(cli_layer, args.config.as_deref())?;

    let report = inspect_file(&FfprobeAdapter::new(ffprobe), &args.input, &canvas).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File:         {}", report.file);
        println!(
            "Video:        {}x{} (rotation {}, displaymatrix {})",
            report.width, report.height, report.rotation, report.displaymatrix
        );
        println!("Audio:        {}", if report.has_audio { "yes" } else { "no" });
        println!("Orientation:  {}", report.orientation);
        match (&report.timestamp, &report.timestamp_error) {
            (Some(timestamp), _) => println!("Timestamp:    {} {}", timestamp.date, timestamp.time),
            (None, Some(error)) => println!("Timestamp:    none ({})", error),
            (None, None) => println!("Timestamp:    none"),
        }
        println!("Filtergraph:  {}", report.filtergraph);
    }
    Ok(())
}

async fn inspect_file(probe: &dyn ProbePort, input: &Path, canvas: &TargetCanvas) -> Result<InspectReport> {
    let media = probe
        .probe(input)
        .await
        .with_context(|| format!("Failed to inspect {}", input.display()))?;
    let stream = media.require_video_stream()?;
    let orientation = OrientationClassifier::classify_stream(stream);

    let file = file_name_of(input);
    let (timestamp, timestamp_error) = match parse_timestamp(&file) {
        Ok(timestamp) => (Some(timestamp), None),
        Err(e) => (None, Some(e.to_string())),
    };
    let plan = TransformPlanner::plan(orientation, canvas, timestamp.as_ref());

    Ok(InspectReport {
        width: stream.width,
        height: stream.height,
        rotation: stream.rotation_degrees(),
        displaymatrix: stream.displaymatrix_degrees(),
        has_audio: media.has_audio(),
        orientation,
        timestamp,
        timestamp_error,
        filtergraph: plan.to_filtergraph(),
        plan,
        file,
    })
}
