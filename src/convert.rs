//! Pure conversion functions: TOML config structs -> crate API request types.

use anyhow::{Context, Result, bail};

use swbs_export::{Compression, OutputNames, RasterExportRequest, TableExportRequest};
use swbs_grid::GridSeries;
use swbs_summary::{Recipe, SummaryMetadata, SummaryRequest};

use crate::config::{ExportToml, InputConfig, SummaryToml};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Resolves the `[summary]` section to one of the twelve recipes.
pub fn build_recipe(summary: &SummaryToml) -> Result<Recipe> {
    Ok(Recipe::parse(&summary.basetype, &summary.operation)?)
}

/// Builds a [`SummaryRequest`] from the `[input]` section.
pub fn build_summary_request(input: &InputConfig, recipe: Recipe) -> Result<SummaryRequest> {
    SummaryRequest::new(&input.path, &input.variable, recipe)
        .with_scenario(&input.scenario_name)
        .with_weather_data(&input.weather_data_name)
        .with_date_strings(input.start_date.as_deref(), input.end_date.as_deref())
        .context("invalid [input] date window")
}

/// The time-period label used in output filenames.
///
/// An explicit `time_period` wins; otherwise both dates must be set and
/// the label is `{start year}-{end year}`.
pub fn time_period(input: &InputConfig) -> Result<String> {
    if let Some(tp) = &input.time_period {
        return Ok(tp.clone());
    }
    match (&input.start_date, &input.end_date) {
        (Some(start), Some(end)) => Ok(format!("{}-{}", year_of(start)?, year_of(end)?)),
        _ => bail!("set [input].time_period or both start_date and end_date"),
    }
}

fn year_of(date: &str) -> Result<&str> {
    date.split('-')
        .next()
        .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
        .with_context(|| format!("cannot take a year from date {date:?}"))
}

/// Builds the shared naming fields from the attributes of a summary result.
pub fn build_output_names(result: &GridSeries, time_period: String) -> Result<OutputNames> {
    let meta =
        SummaryMetadata::from_series(result).context("summary result lacks naming metadata")?;
    Ok(OutputNames::from_metadata(&meta, time_period))
}

/// Builds a [`RasterExportRequest`] from the `[export]` section.
pub fn build_raster_request(export: &ExportToml, names: OutputNames) -> RasterExportRequest {
    RasterExportRequest::new(names, &export.output_dir).with_crs(export.from_epsg, export.to_epsg)
}

/// Builds a [`TableExportRequest`] writing into `[export].output_dir`.
pub fn build_table_request(
    export: &ExportToml,
    names: OutputNames,
    compression: Compression,
) -> TableExportRequest {
    TableExportRequest::new(names, &export.output_dir).with_compression(compression)
}
