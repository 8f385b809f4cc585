//! Top-level summary construction.

use std::path::{Path, PathBuf};

use chrono::{Months, NaiveDate};
use swbs_grid::{GridSeries, ReaderConfig, read_grid_series};
use tracing::info;

use crate::error::SummaryError;
use crate::metadata::SummaryMetadata;
use crate::recipe::{Recipe, SecondPass};
use crate::reduce::{group_by_month, mean_over_time, resample};

// ---------------------------------------------------------------------------
// SummaryRequest
// ---------------------------------------------------------------------------

/// Everything needed to summarise one variable from one file.
///
/// Construct with [`SummaryRequest::new`] and refine with the `with_*`
/// builders. Date bounds are inclusive and either may be left open.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    source: PathBuf,
    variable: String,
    scenario_name: String,
    weather_data_name: String,
    recipe: Recipe,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl SummaryRequest {
    pub fn new(source: impl Into<PathBuf>, variable: impl Into<String>, recipe: Recipe) -> Self {
        Self {
            source: source.into(),
            variable: variable.into(),
            scenario_name: String::new(),
            weather_data_name: String::new(),
            recipe,
            start: None,
            end: None,
        }
    }

    pub fn with_scenario(mut self, name: impl Into<String>) -> Self {
        self.scenario_name = name.into();
        self
    }

    pub fn with_weather_data(mut self, name: impl Into<String>) -> Self {
        self.weather_data_name = name.into();
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Like [`SummaryRequest::with_date_range`], parsing `YYYY`, `YYYY-MM`
    /// or `YYYY-MM-DD` strings.
    ///
    /// A partial start bound means the first day of its year or month; a
    /// partial end bound means the last day.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidDate`] if either bound does not parse.
    pub fn with_date_strings(
        self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, SummaryError> {
        let start = start.map(|s| parse_bound(s, Edge::Start)).transpose()?;
        let end = end.map(|s| parse_bound(s, Edge::End)).transpose()?;
        Ok(self.with_date_range(start, end))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn recipe(&self) -> Recipe {
        self.recipe
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

fn parse_bound(value: &str, edge: Edge) -> Result<NaiveDate, SummaryError> {
    let invalid = |reason: String| SummaryError::InvalidDate {
        value: value.to_string(),
        reason,
    };
    let trimmed = value.trim();
    match trimmed.matches('-').count() {
        0 => {
            let year: i32 = trimmed.parse().map_err(|e| invalid(format!("{e}")))?;
            let date = match edge {
                Edge::Start => NaiveDate::from_ymd_opt(year, 1, 1),
                Edge::End => NaiveDate::from_ymd_opt(year, 12, 31),
            };
            date.ok_or_else(|| invalid("year out of range".to_string()))
        }
        1 => {
            let first = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
                .map_err(|e| invalid(e.to_string()))?;
            match edge {
                Edge::Start => Ok(first),
                Edge::End => first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .ok_or_else(|| invalid("month out of range".to_string())),
            }
        }
        _ => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| invalid(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// build_summary
// ---------------------------------------------------------------------------

/// Reads the requested variable and reduces it with the request's recipe.
///
/// The result carries the seven [`SummaryMetadata`] attributes; `units` is
/// copied from the source variable.
///
/// # Errors
///
/// Returns [`SummaryError::Grid`] if the file cannot be read or the date
/// window is empty.
pub fn build_summary(request: &SummaryRequest) -> Result<GridSeries, SummaryError> {
    let config = ReaderConfig::default()
        .with_variable(request.variable.as_str())
        .with_date_range(request.start, request.end);
    let source = read_grid_series(&request.source, &config)?;

    let mut result = summarize(&source, request.recipe)?;

    let metadata = SummaryMetadata {
        variable: request.variable.clone(),
        recipe: request.recipe,
        weather_data_name: request.weather_data_name.clone(),
        scenario_name: request.scenario_name.clone(),
        units: source.units().to_string(),
        source: request.source.clone(),
    };
    metadata.apply(&mut result);

    info!(
        recipe = %request.recipe,
        variable = %request.variable,
        scenario = %request.scenario_name,
        n_in = source.n_steps(),
        n_out = result.n_steps(),
        "built summary"
    );
    Ok(result)
}

/// Applies `recipe` to an in-memory daily series.
///
/// # Errors
///
/// Returns [`SummaryError::NotATimeSeries`] if `series` has no date axis.
pub fn summarize(series: &GridSeries, recipe: Recipe) -> Result<GridSeries, SummaryError> {
    let first = resample(series, recipe.bucket(), recipe.reduction())?;
    match recipe.second_pass() {
        SecondPass::None => Ok(first),
        SecondPass::GroupByMonth => group_by_month(&first),
        SecondPass::MeanAcrossYears => mean_over_time(&first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{BaseType, Operation};

    #[test]
    fn date_strings_parse() {
        let r = SummaryRequest::new("a.nc", "precip", Recipe::new(BaseType::Annual, Operation::Sum))
            .with_date_strings(Some("1981-01-01"), None)
            .unwrap();
        assert_eq!(r.start, NaiveDate::from_ymd_opt(1981, 1, 1));
        assert!(r.end.is_none());
    }

    #[test]
    fn partial_date_strings_expand_to_whole_periods() {
        let recipe = Recipe::new(BaseType::Annual, Operation::Sum);
        let r = SummaryRequest::new("a.nc", "precip", recipe)
            .with_date_strings(Some("1985"), Some("1986"))
            .unwrap();
        assert_eq!(r.start, NaiveDate::from_ymd_opt(1985, 1, 1));
        assert_eq!(r.end, NaiveDate::from_ymd_opt(1986, 12, 31));

        let r = SummaryRequest::new("a.nc", "precip", recipe)
            .with_date_strings(Some("1984-02"), Some("1984-02"))
            .unwrap();
        assert_eq!(r.start, NaiveDate::from_ymd_opt(1984, 2, 1));
        assert_eq!(r.end, NaiveDate::from_ymd_opt(1984, 2, 29));

        let r = SummaryRequest::new("a.nc", "precip", recipe)
            .with_date_strings(None, Some("1990-12"))
            .unwrap();
        assert_eq!(r.end, NaiveDate::from_ymd_opt(1990, 12, 31));
    }

    #[test]
    fn malformed_partial_dates_rejected() {
        let recipe = Recipe::new(BaseType::Annual, Operation::Sum);
        for bad in ["19x5", "1985-13", "1985-"] {
            let err = SummaryRequest::new("a.nc", "precip", recipe)
                .with_date_strings(Some(bad), None)
                .unwrap_err();
            assert!(matches!(err, SummaryError::InvalidDate { .. }), "{bad}");
        }
    }

    #[test]
    fn bad_date_string() {
        let recipe = Recipe::new(BaseType::Annual, Operation::Sum);
        let err = SummaryRequest::new("a.nc", "precip", recipe)
            .with_date_strings(None, Some("1990-13-01"))
            .unwrap_err();
        assert!(matches!(
            err,
            SummaryError::InvalidDate { ref value, .. } if value == "1990-13-01"
        ));
    }

    #[test]
    fn missing_source_is_grid_error() {
        let r = SummaryRequest::new(
            "/nonexistent/swb.nc",
            "precip",
            Recipe::new(BaseType::Annual, Operation::Sum),
        );
        let err = build_summary(&r).unwrap_err();
        assert!(matches!(err, SummaryError::Grid { .. }));
        assert!(!err.is_unsupported());
    }
}
