use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};

use kira_spotgrid::error::GridError;
use kira_spotgrid::image::{ImageLoadError, load_intensity_image};
use kira_spotgrid::logging::init_logging;
use kira_spotgrid::lookup::{LookupError, NoLookup, SpotLookup, load_annotation_table};
use kira_spotgrid::model::calibration::CalibrationProfile;
use kira_spotgrid::model::tier::TierDisplay;
use kira_spotgrid::pipeline::run_analysis;
use kira_spotgrid::pipeline::stage5_report::{ReportError, Stage5Input, write_reports};
use kira_spotgrid::session::GridSession;
use kira_spotgrid::settings::{SettingsError, load_settings};
use kira_spotgrid::simd;

#[derive(Debug, Parser)]
#[command(name = "kira-spotgrid", version, about = "Microarray spot grid analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze one image and write spots.tsv, summary.json, report.txt and analysis.json.
    Run(RunArgs),
    /// Print the effective spot coordinates for a settings file as TSV.
    Grid(GridArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    settings: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Comma or tab separated table with row, col and allergen name columns.
    #[arg(long)]
    lookup: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Show not-elevated values as "< 7.5" instead of the number.
    #[arg(long)]
    threshold_labels: bool,
}

#[derive(Debug, Clone, Args)]
struct GridArgs {
    #[arg(long)]
    settings: PathBuf,
    #[arg(long)]
    width: usize,
    #[arg(long)]
    height: usize,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
        Command::Grid(args) => grid(&args),
    };
    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    info!(backend = simd::backend_name(), "simd backend");

    let settings = load_settings(&args.settings)?;
    let image = load_intensity_image(&args.image)?;
    let table = match &args.lookup {
        Some(path) => Some(load_annotation_table(path)?),
        None => None,
    };
    let lookup: &dyn SpotLookup = match &table {
        Some(t) => t,
        None => &NoLookup,
    };

    let profile = CalibrationProfile::default_v1();
    let output = run_analysis(&image.as_view(), &settings, &profile)?;

    let input = Stage5Input {
        name: args
            .name
            .clone()
            .unwrap_or_else(|| default_name(&args.image)),
        description: args.description.clone(),
        image_filename: args
            .image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        image_width: image.width(),
        image_height: image.height(),
        created_at_unix: unix_now(),
        settings: &settings,
        spots: &output.normalized.spots,
        calibration: &output.normalized.calibration,
        profile: &profile,
        lookup,
        display: tier_display(args.threshold_labels),
        tool_name: "kira-spotgrid".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;
    Ok(())
}

fn grid(args: &GridArgs) -> Result<(), RunError> {
    let settings = load_settings(&args.settings)?;
    let session = GridSession::from_settings(args.height, args.width, settings)?;
    let coordinates = session.effective_coordinates()?;
    println!("row\tcol\tx\ty");
    for c in &coordinates {
        println!("{}\t{}\t{:.4}\t{:.4}", c.row, c.col, c.x, c.y);
    }
    Ok(())
}

fn default_name(image: &Path) -> String {
    image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "analysis".to_string())
}

fn tier_display(threshold_labels: bool) -> TierDisplay {
    if threshold_labels {
        TierDisplay::Threshold
    } else {
        TierDisplay::Numeric
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
