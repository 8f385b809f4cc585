//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use chrono::NaiveDate;
use ndarray::{Array2, Array3};
use swbs_calendar::{CfCalendar, TimeUnits, decode_time_axis};
use tracing::{debug, info};

use crate::error::GridError;
use crate::netcdf_read;
use crate::series::{GridSeries, TimeAxis};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading one gridded variable from a NetCDF file.
///
/// Use the builder methods (`with_*`) to pick the variable, coordinate
/// aliases and an optional date window. The [`Default`] implementation
/// supplies the projected `x`/`y` names written by SWB, falling back to
/// geographic `lon`/`lat`.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Name of the data variable.
    variable: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up x coordinates.
    x_aliases: Vec<String>,
    /// Aliases to try when looking up y coordinates.
    y_aliases: Vec<String>,
    /// Inclusive lower bound of the date window.
    start: Option<NaiveDate>,
    /// Inclusive upper bound of the date window.
    end: Option<NaiveDate>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "net_infiltration".into(),
            time_var: "time".into(),
            x_aliases: vec!["x".into(), "lon".into(), "longitude".into()],
            y_aliases: vec!["y".into(), "lat".into(), "latitude".into()],
            start: None,
            end: None,
        }
    }
}

impl ReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Restrict the read to `start..=end`; either bound may be `None`.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

// ---------------------------------------------------------------------------
// read_grid_series
// ---------------------------------------------------------------------------

/// Read one `time x y x x` variable from a NetCDF file.
///
/// The variable must carry a `units` attribute. The time variable is
/// decoded from its CF `units`/`calendar` attributes. The file handle is
/// closed before this function returns.
///
/// # Errors
///
/// Returns [`GridError`] on missing variables or attributes, dimension
/// mismatches, undecodable time axes, or an empty date window.
pub fn read_grid_series(path: &Path, config: &ReaderConfig) -> Result<GridSeries, GridError> {
    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let x_refs: Vec<&str> = config.x_aliases.iter().map(String::as_str).collect();
    let y_refs: Vec<&str> = config.y_aliases.iter().map(String::as_str).collect();
    let x = netcdf_read::read_1d_f64(&file, &x_refs, path)?;
    let y = netcdf_read::read_1d_f64(&file, &y_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
    let units_str = netcdf_read::string_attribute(&file, &config.time_var, "units")?;
    let units: TimeUnits = units_str.parse()?;
    let calendar = match netcdf_read::optional_string_attribute(&file, &config.time_var, "calendar")
    {
        Some(name) => name.parse::<CfCalendar>()?,
        None => CfCalendar::Standard,
    };
    let dates = decode_time_axis(&offsets, &units, calendar)?;
    debug!(
        n_steps = dates.len(),
        ?calendar,
        first = ?dates.first(),
        last = ?dates.last(),
        "decoded time axis"
    );

    // -- Data ---------------------------------------------------------------

    let value_units = netcdf_read::string_attribute(&file, &config.variable, "units")?;
    let (values, [nt, ny, nx]) = netcdf_read::read_nd_f64::<3>(&file, &config.variable, path)?;
    drop(file);

    for (name, expected, got) in [("time", dates.len(), nt), ("y", y.len(), ny), ("x", x.len(), nx)]
    {
        if expected != got {
            return Err(GridError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }

    let n_values = values.len();
    let data = Array3::from_shape_vec((nt, ny, nx), values).map_err(|_| {
        GridError::DimensionMismatch {
            name: format!("{} values", config.variable),
            expected: nt * ny * nx,
            got: n_values,
        }
    })?;

    let series = GridSeries::new(
        config.variable.clone(),
        value_units,
        TimeAxis::Dates(dates),
        y,
        x,
        data,
    )?;

    let series = if config.start.is_some() || config.end.is_some() {
        series.select_dates(config.start, config.end)?
    } else {
        series
    };

    info!(
        path = %path.display(),
        variable = %series.variable(),
        units = %series.units(),
        n_steps = series.n_steps(),
        ny,
        nx,
        "loaded gridded series"
    );

    Ok(series)
}

// ---------------------------------------------------------------------------
// read_zones
// ---------------------------------------------------------------------------

/// Read a 2-D zone-id grid (`y x x`).
///
/// Fill values and NaN become `-1`, meaning "no zone"; other values are
/// rounded to the nearest integer.
///
/// # Errors
///
/// Returns [`GridError`] if the file or variable is missing or the variable
/// is not two-dimensional.
pub fn read_zones(path: &Path, variable: &str) -> Result<Array2<i64>, GridError> {
    let file = netcdf_read::open_file(path)?;
    let (values, [ny, nx]) = netcdf_read::read_nd_f64::<2>(&file, variable, path)?;
    drop(file);

    let n_values = values.len();
    let zones: Vec<i64> = values
        .into_iter()
        .map(|v| if v.is_finite() { v.round() as i64 } else { -1 })
        .collect();
    let zones = Array2::from_shape_vec((ny, nx), zones).map_err(|_| {
        GridError::DimensionMismatch {
            name: format!("{variable} values"),
            expected: ny * nx,
            got: n_values,
        }
    })?;

    debug!(path = %path.display(), variable, ny, nx, "loaded zone grid");
    Ok(zones)
}
