//! Temporal reductions over a [`GridSeries`].

use std::collections::BTreeMap;

use chrono::Datelike;
use ndarray::Array3;
use swbs_calendar::Bucket;
use swbs_grid::{GridSeries, TimeAxis};
use tracing::debug;

use crate::error::SummaryError;
use crate::recipe::Reduction;

/// Resamples a daily series into `bucket` periods, reducing each period with
/// `reduction`.
///
/// Periods run contiguously from the one containing the first date to the
/// one containing the last; a period with no member steps yields NaN in
/// every cell. The output axis carries each period's label.
///
/// # Errors
///
/// Returns [`SummaryError::NotATimeSeries`] if `series` has no date axis and
/// [`SummaryError::Calendar`] if a period boundary is not representable.
pub fn resample(
    series: &GridSeries,
    bucket: Bucket,
    reduction: Reduction,
) -> Result<GridSeries, SummaryError> {
    let dates = series
        .time()
        .dates()
        .ok_or_else(|| SummaryError::NotATimeSeries {
            variable: series.variable().to_string(),
        })?;

    let (Some(&first), Some(&last)) = (dates.iter().min(), dates.iter().max()) else {
        return Err(SummaryError::NotATimeSeries {
            variable: series.variable().to_string(),
        });
    };

    let starts = bucket.periods(first, last)?;
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); starts.len()];
    for (t, &date) in dates.iter().enumerate() {
        // Every date lies within first..=last, so its period is always found.
        if let Ok(p) = starts.binary_search(&bucket.period_start(date)?) {
            members[p].push(t);
        }
    }

    let data = series.data();
    let (_, ny, nx) = data.dim();
    let out = Array3::from_shape_fn((starts.len(), ny, nx), |(p, j, i)| {
        reduction.apply(members[p].iter().map(|&t| data[[t, j, i]]))
    });
    let labels = starts
        .iter()
        .map(|&s| bucket.label(s))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        ?bucket,
        ?reduction,
        n_in = dates.len(),
        n_out = starts.len(),
        "resampled series"
    );

    Ok(series.with_time_data(TimeAxis::Dates(labels), out)?)
}

/// Groups steps by the calendar month of their date label and takes the
/// NaN-skipping mean of each group.
///
/// The output axis lists the months present, ascending.
///
/// # Errors
///
/// Returns [`SummaryError::NotATimeSeries`] if `series` has no date axis.
pub fn group_by_month(series: &GridSeries) -> Result<GridSeries, SummaryError> {
    let dates = series
        .time()
        .dates()
        .ok_or_else(|| SummaryError::NotATimeSeries {
            variable: series.variable().to_string(),
        })?;

    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (t, d) in dates.iter().enumerate() {
        groups.entry(d.month()).or_default().push(t);
    }
    let months: Vec<u32> = groups.keys().copied().collect();
    let members: Vec<Vec<usize>> = groups.into_values().collect();

    let data = series.data();
    let (_, ny, nx) = data.dim();
    let out = Array3::from_shape_fn((members.len(), ny, nx), |(g, j, i)| {
        Reduction::NanMean.apply(members[g].iter().map(|&t| data[[t, j, i]]))
    });

    debug!(?months, "grouped by month");
    Ok(series.with_time_data(TimeAxis::Months(months), out)?)
}

/// NaN-skipping mean over every step, collapsing the time axis.
///
/// Works on any axis kind; the result always holds a single grid.
pub fn mean_over_time(series: &GridSeries) -> Result<GridSeries, SummaryError> {
    let data = series.data();
    let (nt, ny, nx) = data.dim();
    let out = Array3::from_shape_fn((1, ny, nx), |(_, j, i)| {
        Reduction::NanMean.apply((0..nt).map(|t| data[[t, j, i]]))
    });
    Ok(series.with_time_data(TimeAxis::Collapsed, out)?)
}
