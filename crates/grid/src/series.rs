//! Gridded time series with descriptive attributes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::{Array3, ArrayView2, Axis, s};

use crate::error::GridError;

// ---------------------------------------------------------------------------
// TimeAxis
// ---------------------------------------------------------------------------

/// Labels along the leading (time) dimension of a [`GridSeries`].
#[derive(Debug, Clone, PartialEq)]
pub enum TimeAxis {
    /// One calendar date per step.
    Dates(Vec<NaiveDate>),
    /// One calendar month (1..=12) per step, after grouping across years.
    Months(Vec<u32>),
    /// The time dimension has been reduced away; the series holds one grid.
    Collapsed,
}

impl TimeAxis {
    /// Number of steps along the axis. A collapsed axis has length 1.
    pub fn len(&self) -> usize {
        match self {
            TimeAxis::Dates(d) => d.len(),
            TimeAxis::Months(m) => m.len(),
            TimeAxis::Collapsed => 1,
        }
    }

    /// Returns `true` if the axis has no steps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Date labels, if this is a date axis.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        match self {
            TimeAxis::Dates(d) => Some(d),
            _ => None,
        }
    }

    /// Month labels, if this is a month axis.
    pub fn months(&self) -> Option<&[u32]> {
        match self {
            TimeAxis::Months(m) => Some(m),
            _ => None,
        }
    }

    /// NetCDF dimension name for the axis, or `None` when collapsed.
    pub fn dimension_name(&self) -> Option<&'static str> {
        match self {
            TimeAxis::Dates(_) => Some("time"),
            TimeAxis::Months(_) => Some("month"),
            TimeAxis::Collapsed => None,
        }
    }
}

// ---------------------------------------------------------------------------
// GridSeries
// ---------------------------------------------------------------------------

/// A single gridded variable over time.
///
/// `data` is laid out `[time, y, x]`; its shape always agrees with the
/// lengths of the time axis and the `y`/`x` coordinate vectors.
#[derive(Debug, Clone)]
pub struct GridSeries {
    variable: String,
    units: String,
    time: TimeAxis,
    y: Vec<f64>,
    x: Vec<f64>,
    data: Array3<f64>,
    attrs: BTreeMap<String, String>,
}

impl GridSeries {
    /// Creates a series after checking that `data` matches the axes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] naming the first dimension
    /// whose length disagrees.
    pub fn new(
        variable: impl Into<String>,
        units: impl Into<String>,
        time: TimeAxis,
        y: Vec<f64>,
        x: Vec<f64>,
        data: Array3<f64>,
    ) -> Result<Self, GridError> {
        let (nt, ny, nx) = data.dim();
        for (name, expected, got) in [
            ("time", time.len(), nt),
            ("y", y.len(), ny),
            ("x", x.len(), nx),
        ] {
            if expected != got {
                return Err(GridError::DimensionMismatch {
                    name: name.to_string(),
                    expected,
                    got,
                });
            }
        }

        Ok(Self {
            variable: variable.into(),
            units: units.into(),
            time,
            y,
            x,
            data,
            attrs: BTreeMap::new(),
        })
    }

    /// Variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Physical unit of the values.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Time axis labels.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Y (northing / latitude) cell-centre coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// X (easting / longitude) cell-centre coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Values, `[time, y, x]`.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Number of steps along the time axis.
    pub fn n_steps(&self) -> usize {
        self.time.len()
    }

    /// One `[y, x]` grid.
    ///
    /// # Panics
    ///
    /// Panics if `step >= self.n_steps()`.
    pub fn slice(&self, step: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(0), step)
    }

    /// Descriptive attributes, sorted by name.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// A single attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Builder-style [`GridSeries::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Replaces the time axis and values, keeping name, units, coordinates
    /// and attributes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the new data does not fit
    /// the new axis or the existing coordinates.
    pub fn with_time_data(&self, time: TimeAxis, data: Array3<f64>) -> Result<Self, GridError> {
        let mut out = Self::new(
            self.variable.clone(),
            self.units.clone(),
            time,
            self.y.clone(),
            self.x.clone(),
            data,
        )?;
        out.attrs = self.attrs.clone();
        Ok(out)
    }

    /// Keeps only steps whose date lies within `start..=end`; either bound
    /// may be open.
    ///
    /// Series without a date axis are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptySelection`] if no date falls in the range.
    pub fn select_dates(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, GridError> {
        let Some(dates) = self.time.dates() else {
            return Ok(self.clone());
        };

        let keep: Vec<usize> = dates
            .iter()
            .enumerate()
            .filter(|&(_, d)| start.is_none_or(|s| *d >= s) && end.is_none_or(|e| *d <= e))
            .map(|(i, _)| i)
            .collect();

        if keep.is_empty() {
            let show = |d: Option<NaiveDate>| d.map_or_else(|| "..".to_string(), |d| d.to_string());
            return Err(GridError::EmptySelection {
                start: show(start),
                end: show(end),
            });
        }

        let contiguous = keep.windows(2).all(|w| w[1] == w[0] + 1);
        let data = if contiguous {
            self.data
                .slice(s![keep[0]..=keep[keep.len() - 1], .., ..])
                .to_owned()
        } else {
            self.data.select(Axis(0), &keep)
        };
        let kept_dates = keep.iter().map(|&i| dates[i]).collect();

        self.with_time_data(TimeAxis::Dates(kept_dates), data)
    }
}
