use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// swbs: summaries of gridded soil-water-balance output.
#[derive(Parser)]
#[command(
    name = "swbs",
    version,
    about = "Seasonal, monthly and annual summaries of gridded climate model output"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build one summary and export it as GeoTIFFs and/or NetCDF.
    Summarize(SummarizeArgs),
    /// Build one summary and write per-zone statistics to Parquet.
    Zonal(ZonalArgs),
}

/// Overrides shared by every subcommand.
#[derive(clap::Args)]
pub struct RecipeOverrides {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "swbs.toml")]
    pub config: PathBuf,

    /// Override `[summary].basetype` (e.g. `mean_annual`).
    #[arg(short, long)]
    pub basetype: Option<String>,

    /// Override `[summary].operation` (`sum` or `mean`).
    #[arg(long)]
    pub operation: Option<String>,

    /// Override `[export].output_dir`.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub overrides: RecipeOverrides,
}

/// Arguments for the `zonal` subcommand.
#[derive(clap::Args)]
pub struct ZonalArgs {
    #[command(flatten)]
    pub overrides: RecipeOverrides,

    /// Override `[zonal].zones`, the NetCDF file holding the zone grid.
    #[arg(short, long)]
    pub zones: Option<PathBuf>,
}
