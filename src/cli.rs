//! Command-line form: reads the marker request, runs the engine, and writes
//! one DXF file per piece.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use curvemark_core::{format_length, parse_length, LengthUnit};
use curvemark_marker::{
    write_pieces, MarkerAssembly, MarkerJob, MarkerKind, MarkerPiece, MarkerPlan,
};
use curvemark_settings::Config;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "curvemark")]
#[command(version, about = "Generate DXF cutting markers for fabric panels", long_about = None)]
pub struct Cli {
    /// Output file stem; pieces are written as NAME.dxf or NAME_01.dxf, NAME_02.dxf, ...
    /// Defaults to the configured stem
    pub name: Option<String>,

    /// Finished fabric width (in --unit, inches accept "1 1/2")
    #[arg(short = 'W', long, allow_hyphen_values = true)]
    pub width: String,

    /// Finished fabric height (in --unit)
    #[arg(short = 'H', long, allow_hyphen_values = true)]
    pub height: String,

    /// Roll width (in --unit); defaults to the configured roll
    #[arg(short, long, allow_hyphen_values = true)]
    pub roll_width: Option<String>,

    /// Unit of width, height and roll width: mm, cm or in
    #[arg(short, long)]
    pub unit: Option<LengthUnit>,

    /// Tube sag in millimetres; 0 keeps the top straight
    #[arg(short, long, allow_hyphen_values = true)]
    pub deflection: Option<f64>,

    /// Marker kind: plain, tube55, tube65 or tube80
    #[arg(short, long)]
    pub kind: Option<MarkerKind>,

    /// Split across the grain even when the panel fits the roll
    #[arg(long)]
    pub force_cross_grain: bool,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the DXF files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the plan and outlines as JSON instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// What one run produced.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub job: MarkerJob,
    pub plan: MarkerPlan,
    pub pieces: Vec<MarkerPiece>,
    /// Files written; empty for a dry run
    pub written: Vec<PathBuf>,
}

impl Cli {
    /// Output stem from the command line, else from the configuration.
    pub fn stem(&self, config: &Config) -> Result<String> {
        let stem = self
            .name
            .as_deref()
            .or(config.output.stem.as_deref())
            .map(str::trim)
            .ok_or_else(|| anyhow!("No output name given and no output.stem configured"))?;
        if stem.is_empty() {
            bail!("Output name must not be empty");
        }
        Ok(stem.to_string())
    }

    /// Converts the form values into a millimetre job.
    pub fn to_job(&self, config: &Config) -> Result<MarkerJob> {
        let unit = self.unit.unwrap_or(config.defaults.unit);

        let width = parse_field("width", &self.width, unit)?;
        let height = parse_field("height", &self.height, unit)?;
        let roll_width = match &self.roll_width {
            Some(value) => parse_field("roll width", value, unit)?,
            None => config
                .defaults
                .roll_width_mm
                .ok_or_else(|| anyhow!("No roll width given and none configured"))?,
        };

        Ok(MarkerJob::new(width, height, roll_width)
            .with_deflection(self.deflection.unwrap_or(config.defaults.deflection_mm))
            .with_kind(self.kind.unwrap_or(config.defaults.kind))
            .with_force_cross_grain(self.force_cross_grain))
    }
}

fn parse_field(label: &str, value: &str, unit: LengthUnit) -> Result<f64> {
    parse_length(value, unit)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Invalid {} '{}'", label, value))
}

/// Runs the form end to end.
///
/// Nothing is written unless every piece was built.
pub fn run(cli: &Cli) -> Result<RunReport> {
    let config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    let stem = cli.stem(&config)?;
    let job = cli.to_job(&config)?;
    let unit = cli.unit.unwrap_or(config.defaults.unit);

    let assembly = MarkerAssembly::new(&config.marker).context("Invalid marker configuration")?;
    let plan = assembly.plan(&job).context("Cannot plan marker")?;
    let pieces = assembly.assemble(&job).context("Cannot build marker")?;

    info!(
        "{} marker {} x {} on {} roll: {} piece(s)",
        plan.orientation,
        format_length(job.width, unit),
        format_length(job.height, unit),
        format_length(job.roll_width, unit),
        pieces.len()
    );

    let written = if cli.dry_run {
        Vec::new()
    } else {
        let dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone());
        write_pieces(&dir, &stem, &pieces)
            .with_context(|| format!("Failed to write markers to {}", dir.display()))?
    };

    Ok(RunReport {
        job,
        plan,
        pieces,
        written,
    })
}

/// Pretty JSON for `--dry-run`.
pub fn render_dry_run(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize dry run")
}
