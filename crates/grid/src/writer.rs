//! NetCDF serialisation of a [`GridSeries`].

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::GridError;
use crate::series::{GridSeries, TimeAxis};

const EPOCH_UNITS: &str = "days since 1970-01-01 00:00:00";

/// Write `series` to a new NetCDF file at `path`, replacing any existing file.
///
/// The file holds the `y`/`x` coordinate variables, the time-like axis
/// (`time` for dates, `month` for grouped months, nothing when collapsed),
/// and the data variable with its `units`. Series attributes become global
/// attributes.
///
/// # Errors
///
/// Returns [`GridError::Netcdf`] if the file cannot be created or written.
pub fn write_netcdf(series: &GridSeries, path: &Path) -> Result<(), GridError> {
    let mut file = netcdf::create(path)?;

    let (ny, nx) = (series.y().len(), series.x().len());
    let time_dim = series.time().dimension_name();
    if let Some(dim) = time_dim {
        file.add_dimension(dim, series.n_steps())?;
    }
    file.add_dimension("y", ny)?;
    file.add_dimension("x", nx)?;

    {
        let mut var = file.add_variable::<f64>("y", &["y"])?;
        var.put_attribute("standard_name", "projection_y_coordinate")?;
        var.put_values(series.y(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("x", &["x"])?;
        var.put_attribute("standard_name", "projection_x_coordinate")?;
        var.put_values(series.x(), ..)?;
    }

    match series.time() {
        TimeAxis::Dates(dates) => {
            let offsets = days_since_epoch(dates);
            let mut var = file.add_variable::<f64>("time", &["time"])?;
            var.put_attribute("units", EPOCH_UNITS)?;
            var.put_attribute("calendar", "standard")?;
            var.put_values(&offsets, ..)?;
        }
        TimeAxis::Months(months) => {
            let months: Vec<i32> = months.iter().map(|&m| m as i32).collect();
            let mut var = file.add_variable::<i32>("month", &["month"])?;
            var.put_attribute("long_name", "calendar month of period start")?;
            var.put_values(&months, ..)?;
        }
        TimeAxis::Collapsed => {}
    }

    {
        let dims: Vec<&str> = time_dim.into_iter().chain(["y", "x"]).collect();
        let mut var = file.add_variable::<f64>(series.variable(), &dims)?;
        var.put_attribute("units", series.units())?;
        var.put_attribute("_FillValue", f64::NAN)?;
        let values: Vec<f64> = series.data().iter().copied().collect();
        var.put_values(&values, ..)?;
    }

    for (name, value) in series.attrs() {
        file.add_attribute(name, value.as_str())?;
    }

    info!(
        path = %path.display(),
        variable = %series.variable(),
        n_steps = series.n_steps(),
        "wrote NetCDF"
    );
    Ok(())
}

fn days_since_epoch(dates: &[NaiveDate]) -> Vec<f64> {
    let epoch = NaiveDate::default();
    dates
        .iter()
        .map(|d| d.signed_duration_since(epoch).num_days() as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_offsets() {
        let d = [
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 11).unwrap(),
            NaiveDate::from_ymd_opt(1969, 12, 31).unwrap(),
        ];
        assert_eq!(days_since_epoch(&d), vec![0.0, 10.0, -1.0]);
    }
}
