//! Summarize command: build one summary and export it.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use swbs_export::{export_netcdf, export_raster_series};
use swbs_summary::build_summary;

use crate::cli::SummarizeArgs;
use crate::config::SwbsConfig;
use crate::convert;

/// Run the summarize pipeline.
pub fn run(args: SummarizeArgs) -> Result<()> {
    let _cmd = info_span!("summarize").entered();
    let o = &args.overrides;

    // 1. Load config and apply CLI overrides
    let config = SwbsConfig::load(&o.config)?.with_overrides(
        o.basetype.as_deref(),
        o.operation.as_deref(),
        o.output_dir.as_deref(),
    );
    let recipe = convert::build_recipe(&config.summary)?;
    let time_period = convert::time_period(&config.input)?;
    let request = convert::build_summary_request(&config.input, recipe)?;

    // 2. Build the summary
    info!(path = %config.input.path.display(), %recipe, "building summary");
    let result = build_summary(&request)
        .with_context(|| format!("failed to summarize {}", config.input.path.display()))?;
    let names = convert::build_output_names(&result, time_period)?;

    // 3. Whole-dataset NetCDF
    if config.export.netcdf {
        let path = config.export.output_dir.join(names.dataset_filename());
        export_netcdf(&result, &path)
            .with_context(|| format!("failed to write NetCDF: {}", path.display()))?;
        info!(path = %path.display(), "wrote summary dataset");
    }

    // 4. One GeoTIFF per step
    if config.export.geotiff {
        let req = convert::build_raster_request(&config.export, names);
        match export_raster_series(&result, &req) {
            Ok(written) => info!(n_files = written.len(), "wrote GeoTIFF series"),
            Err(e) if e.is_unsupported() => warn!(%recipe, error = %e, "skipping GeoTIFF export"),
            Err(e) => return Err(e).context("failed to write GeoTIFF series"),
        }
    }

    Ok(())
}
