//! Zonal command: per-zone statistics of one summary, written to Parquet.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use swbs_export::{export_zonal_parquet, zonal_stats};
use swbs_grid::read_zones;
use swbs_summary::build_summary;

use crate::cli::ZonalArgs;
use crate::config::SwbsConfig;
use crate::convert;

/// Run the zonal-statistics pipeline.
pub fn run(args: ZonalArgs) -> Result<()> {
    let _cmd = info_span!("zonal").entered();
    let o = &args.overrides;

    // 1. Load config and resolve the zone grid
    let config = SwbsConfig::load(&o.config)?.with_overrides(
        o.basetype.as_deref(),
        o.operation.as_deref(),
        o.output_dir.as_deref(),
    );
    let zones_path = args
        .zones
        .as_ref()
        .or(config.zonal.zones.as_ref())
        .ok_or_else(|| anyhow!("no zone grid: set [zonal].zones in config or use --zones"))?;

    let recipe = convert::build_recipe(&config.summary)?;
    let time_period = convert::time_period(&config.input)?;
    let compression = convert::parse_compression(&config.zonal.compression)?;
    let request = convert::build_summary_request(&config.input, recipe)?;

    // 2. Read inputs
    let zones = read_zones(zones_path, &config.zonal.zone_variable)
        .with_context(|| format!("failed to read zones: {}", zones_path.display()))?;
    let result = build_summary(&request)
        .with_context(|| format!("failed to summarize {}", config.input.path.display()))?;
    let names = convert::build_output_names(&result, time_period)?;
    let table_req = convert::build_table_request(&config.export, names, compression);

    // 3. Statistics and Parquet
    let table = zonal_stats(&result, &zones).context("failed to compute zonal statistics")?;
    info!(n_rows = table.len(), "computed zonal statistics");
    let path = export_zonal_parquet(&table, &table_req)
        .with_context(|| format!("cannot export '{recipe}' zonal statistics"))?;
    info!(path = %path.display(), "wrote zonal table");

    Ok(())
}
