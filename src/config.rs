use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use swbs_util::{camel_to_underscore, read_toml_file};

/// Top-level swbs configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwbsConfig {
    /// Source dataset and naming.
    pub input: InputConfig,

    /// Which recipe to apply.
    #[serde(default)]
    pub summary: SummaryToml,

    /// Raster and NetCDF output settings.
    #[serde(default)]
    pub export: ExportToml,

    /// Zonal-statistics settings.
    #[serde(default)]
    pub zonal: ZonalToml,
}

impl SwbsConfig {
    /// Load a config file.
    ///
    /// Keys may be written in `camelCase` as found in SWB control files;
    /// they are converted to `snake_case` before deserializing.
    pub fn load(path: &Path) -> Result<Self> {
        let table = read_toml_file(path)?;
        toml::Value::Table(normalize_keys(table))
            .try_into::<SwbsConfig>()
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        basetype: Option<&str>,
        operation: Option<&str>,
        output_dir: Option<&Path>,
    ) -> Self {
        if let Some(b) = basetype {
            self.summary.basetype = b.to_string();
        }
        if let Some(o) = operation {
            self.summary.operation = o.to_string();
        }
        if let Some(dir) = output_dir {
            self.export.output_dir = dir.to_path_buf();
        }
        self
    }
}

fn normalize_keys(table: toml::Table) -> toml::Table {
    table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::Table(inner) => toml::Value::Table(normalize_keys(inner)),
                other => other,
            };
            (camel_to_underscore(&key), value)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub path: PathBuf,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default)]
    pub scenario_name: String,
    #[serde(default)]
    pub weather_data_name: String,
    /// Label such as `1981-1990`; derived from the date window if absent.
    #[serde(default)]
    pub time_period: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn default_variable() -> String {
    "net_infiltration".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryToml {
    #[serde(default = "default_basetype")]
    pub basetype: String,
    #[serde(default = "default_operation")]
    pub operation: String,
}

impl Default for SummaryToml {
    fn default() -> Self {
        Self {
            basetype: default_basetype(),
            operation: default_operation(),
        }
    }
}

fn default_basetype() -> String {
    "mean_annual".to_string()
}
fn default_operation() -> String {
    "sum".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportToml {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub geotiff: bool,
    #[serde(default)]
    pub netcdf: bool,
    #[serde(default = "default_from_epsg")]
    pub from_epsg: u32,
    #[serde(default = "default_to_epsg")]
    pub to_epsg: u32,
}

impl Default for ExportToml {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            geotiff: true,
            netcdf: false,
            from_epsg: default_from_epsg(),
            to_epsg: default_to_epsg(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_true() -> bool {
    true
}
fn default_from_epsg() -> u32 {
    5070
}
fn default_to_epsg() -> u32 {
    4326
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZonalToml {
    #[serde(default)]
    pub zones: Option<PathBuf>,
    #[serde(default = "default_zone_variable")]
    pub zone_variable: String,
    #[serde(default = "default_compression")]
    pub compression: String,
}

impl Default for ZonalToml {
    fn default() -> Self {
        Self {
            zones: None,
            zone_variable: default_zone_variable(),
            compression: default_compression(),
        }
    }
}

fn default_zone_variable() -> String {
    "zone".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
