//! Finds the differences between two images and prints them as JSON.
//!
//! Parameters come from a JSON file (`--params`), from the image's
//! complexity (`--auto`), or default to the medium preset.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use diff_spotter::{
    AnalysisParams, PixelBuffer, detect_with_report, overlay, suggest_params,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Detect clickable differences between two pixel-aligned images"
)]
struct Args {
    #[arg(help = "Original image")]
    original: PathBuf,

    #[arg(help = "Modified image, same size as the original")]
    modified: PathBuf,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON parameter file; missing fields use the medium preset",
        conflicts_with = "auto"
    )]
    params: Option<PathBuf>,

    #[arg(long, help = "Pick parameters from the original image's complexity")]
    auto: bool,

    #[arg(long, value_name = "PNG", help = "Write the modified image with difference circles")]
    overlay: Option<PathBuf>,

    #[arg(long, value_name = "PNG", help = "Write the raw difference mask")]
    mask: Option<PathBuf>,

    #[arg(long, value_name = "PNG", help = "Write the merged region boxes")]
    regions: Option<PathBuf>,

    #[arg(long, help = "Print stage counts alongside the differences")]
    report: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let original = PixelBuffer::open(&args.original)
        .with_context(|| format!("loading {}", args.original.display()))?;
    let modified = PixelBuffer::open(&args.modified)
        .with_context(|| format!("loading {}", args.modified.display()))?;

    let params = if let Some(path) = &args.params {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading parameter file {}", path.display()))?;
        AnalysisParams::from_json_str(&json)
            .with_context(|| format!("parsing parameter file {}", path.display()))?
    } else if args.auto {
        suggest_params(&original).context("scoring image complexity")?
    } else {
        AnalysisParams::default()
    };
    info!(?params, "analysis parameters");

    let report = detect_with_report(&original, &modified, &params).context("detection failed")?;
    info!(
        differences = report.differences.len(),
        diff_pixels = report.diff_pixel_count,
        "detection finished"
    );

    if let Some(path) = &args.overlay {
        overlay::draw_differences(&modified, &report.differences)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.regions {
        overlay::draw_regions(&modified, &report.merged)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.mask {
        overlay::mask_to_image(&report.mask)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let output = if args.report {
        serde_json::json!({
            "params": params,
            "diffPixelCount": report.diff_pixel_count,
            "labelled": report.labelled,
            "filtered": report.filtered,
            "merged": report.merged.len(),
            "differences": report.differences,
        })
    } else {
        serde_json::to_value(&report.differences)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if report.differences.is_empty() && report.diff_pixel_count > 0 {
        warn!(
            diff_pixels = report.diff_pixel_count,
            "pixels differ but no region survived filtering; try --auto or looser parameters"
        );
    }
    Ok(())
}
