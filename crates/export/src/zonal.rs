//! Per-zone statistics over a summary grid.

use std::collections::BTreeMap;

use chrono::Datelike;
use ndarray::Array2;
use swbs_grid::{GridSeries, TimeAxis};
use tracing::debug;

use crate::error::ExportError;

/// Statistics for one zone in one summary step.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalRow {
    pub zone: i64,
    /// Calendar year of the step label, for date axes.
    pub year: Option<i32>,
    /// Month of the step label, for date and month axes.
    pub month: Option<u32>,
    /// Number of non-NaN cells.
    pub count: u64,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Rows ordered by step, then zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZonalStatsTable {
    rows: Vec<ZonalRow>,
}

impl ZonalStatsTable {
    pub fn new(rows: Vec<ZonalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ZonalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn push(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        if self.count == 0 {
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.count += 1;
        self.sum += v;
    }

    fn finish(self, zone: i64, year: Option<i32>, month: Option<u32>) -> ZonalRow {
        let (mean, min, max) = if self.count == 0 {
            (f64::NAN, f64::NAN, f64::NAN)
        } else {
            (self.sum / self.count as f64, self.min, self.max)
        };
        ZonalRow {
            zone,
            year,
            month,
            count: self.count,
            sum: self.sum,
            mean,
            min,
            max,
        }
    }
}

/// Computes count, sum, mean, min and max of each zone for every step of
/// `result`.
///
/// `zones` must have the summary's `[y, x]` shape. Negative zone ids mark
/// cells outside every zone. NaN cells are skipped; a zone with no valid
/// cells reports a count and sum of zero and NaN for the rest.
///
/// # Errors
///
/// Returns [`ExportError::ZoneShape`] if the grids disagree in shape.
pub fn zonal_stats(
    result: &GridSeries,
    zones: &Array2<i64>,
) -> Result<ZonalStatsTable, ExportError> {
    let (_, ny, nx) = result.data().dim();
    let (zr, zc) = zones.dim();
    if (zr, zc) != (ny, nx) {
        return Err(ExportError::ZoneShape {
            rows: ny,
            cols: nx,
            got_rows: zr,
            got_cols: zc,
        });
    }

    let mut rows = Vec::new();
    for step in 0..result.n_steps() {
        let (year, month) = step_label(result.time(), step);
        let grid = result.slice(step);

        let mut acc: BTreeMap<i64, Accumulator> = BTreeMap::new();
        for (&zone, &v) in zones.iter().zip(grid.iter()) {
            if zone >= 0 {
                acc.entry(zone).or_default().push(v);
            }
        }
        rows.extend(acc.into_iter().map(|(zone, a)| a.finish(zone, year, month)));
    }

    debug!(n_rows = rows.len(), n_steps = result.n_steps(), "computed zonal statistics");
    Ok(ZonalStatsTable::new(rows))
}

fn step_label(axis: &TimeAxis, step: usize) -> (Option<i32>, Option<u32>) {
    match axis {
        TimeAxis::Dates(d) => (Some(d[step].year()), Some(d[step].month())),
        TimeAxis::Months(m) => (None, Some(m[step])),
        TimeAxis::Collapsed => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::{Array3, array};

    fn series(time: TimeAxis, data: Array3<f64>) -> GridSeries {
        let (_, ny, nx) = data.dim();
        GridSeries::new(
            "precip",
            "inches",
            time,
            (0..ny).map(|j| j as f64).collect(),
            (0..nx).map(|i| i as f64).collect(),
            data,
        )
        .unwrap()
    }

    #[test]
    fn stats_per_zone() {
        let data =
            Array3::from_shape_vec((1, 2, 3), vec![1.0, 2.0, 3.0, 4.0, f64::NAN, 6.0]).unwrap();
        let zones = array![[1, 1, 2], [2, 2, -1]];
        let table = zonal_stats(&series(TimeAxis::Collapsed, data), &zones).unwrap();

        assert_eq!(table.len(), 2);
        let z1 = &table.rows()[0];
        assert_eq!((z1.zone, z1.count), (1, 2));
        assert_eq!((z1.sum, z1.mean, z1.min, z1.max), (3.0, 1.5, 1.0, 2.0));
        assert_eq!((z1.year, z1.month), (None, None));

        // Zone 2 covers 3.0, 4.0 and a NaN; the 6.0 cell is unzoned.
        let z2 = &table.rows()[1];
        assert_eq!((z2.zone, z2.count), (2, 2));
        assert_eq!((z2.sum, z2.min, z2.max), (7.0, 3.0, 4.0));
    }

    #[test]
    fn empty_zone_is_nan() {
        let data = Array3::from_elem((1, 1, 2), f64::NAN);
        let zones = array![[5, 5]];
        let table = zonal_stats(&series(TimeAxis::Collapsed, data), &zones).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.count, 0);
        assert_eq!(row.sum, 0.0);
        assert!(row.mean.is_nan() && row.min.is_nan() && row.max.is_nan());
    }

    #[test]
    fn labels_follow_axis() {
        let dates = vec![
            NaiveDate::from_ymd_opt(1980, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(1981, 3, 1).unwrap(),
        ];
        let data = Array3::from_elem((2, 1, 1), 1.0);
        let table = zonal_stats(&series(TimeAxis::Dates(dates), data), &array![[0]]).unwrap();
        assert_eq!(table.rows()[0].year, Some(1980));
        assert_eq!(table.rows()[0].month, Some(12));
        assert_eq!(table.rows()[1].month, Some(3));

        let data = Array3::from_elem((2, 1, 1), 1.0);
        let table =
            zonal_stats(&series(TimeAxis::Months(vec![6, 9]), data), &array![[0]]).unwrap();
        assert_eq!(table.rows()[1].month, Some(9));
        assert_eq!(table.rows()[1].year, None);
    }

    #[test]
    fn shape_mismatch() {
        let data = Array3::from_elem((1, 2, 2), 1.0);
        let err = zonal_stats(&series(TimeAxis::Collapsed, data), &array![[0, 0, 0]]).unwrap_err();
        assert!(matches!(err, ExportError::ZoneShape { got_cols: 3, .. }));
    }
}
