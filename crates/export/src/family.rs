//! Export layouts per summary base type.

use chrono::Datelike;
use swbs_calendar::Season;
use swbs_grid::TimeAxis;
use swbs_summary::BaseType;

use crate::error::ExportError;

/// The summary base types that have a file layout.
///
/// Monthly summaries have none; [`ExportFamily::from_basetype`] rejects
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFamily {
    Seasonal,
    MeanSeasonal,
    Annual,
    MeanAnnual,
}

impl ExportFamily {
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFamily`] for monthly base types.
    pub fn from_basetype(basetype: BaseType, target: &'static str) -> Result<Self, ExportError> {
        match basetype {
            BaseType::Seasonal => Ok(ExportFamily::Seasonal),
            BaseType::MeanSeasonal => Ok(ExportFamily::MeanSeasonal),
            BaseType::Annual => Ok(ExportFamily::Annual),
            BaseType::MeanAnnual => Ok(ExportFamily::MeanAnnual),
            BaseType::Monthly | BaseType::MeanMonthly => Err(ExportError::UnsupportedFamily {
                basetype: basetype.as_str().to_string(),
                target,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFamily::Seasonal => "seasonal",
            ExportFamily::MeanSeasonal => "mean_seasonal",
            ExportFamily::Annual => "annual",
            ExportFamily::MeanAnnual => "mean_annual",
        }
    }

    /// Whether tables for this family carry a `season_name` column.
    pub fn is_seasonal(self) -> bool {
        matches!(self, ExportFamily::Seasonal | ExportFamily::MeanSeasonal)
    }

    /// Timeframe token for every step of `axis`, in order.
    ///
    /// All steps are resolved before returning, so a bad season month is
    /// reported before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnknownSeason`] for a seasonal step whose month
    /// does not start a season, or [`ExportError::AxisMismatch`] if the axis
    /// kind does not fit the family.
    pub fn timeframes(self, axis: &TimeAxis) -> Result<Vec<String>, ExportError> {
        let mismatch = |expected| ExportError::AxisMismatch {
            family: self.name(),
            expected,
        };
        match self {
            ExportFamily::Seasonal => {
                let dates = axis.dates().ok_or_else(|| mismatch("a date axis"))?;
                dates
                    .iter()
                    .map(|d| -> Result<String, ExportError> {
                        let season = Season::from_start_month(d.month())?;
                        Ok(format!("{}-{}", season.timeframe(), d.year()))
                    })
                    .collect()
            }
            ExportFamily::MeanSeasonal => {
                let months = axis.months().ok_or_else(|| mismatch("a month axis"))?;
                months
                    .iter()
                    .map(|&m| -> Result<String, ExportError> {
                        Ok(Season::from_start_month(m)?.timeframe())
                    })
                    .collect()
            }
            ExportFamily::Annual => {
                let dates = axis.dates().ok_or_else(|| mismatch("a date axis"))?;
                Ok(dates.iter().map(|d| format!("yearly-{}", d.year())).collect())
            }
            ExportFamily::MeanAnnual => {
                if axis.len() != 1 {
                    return Err(mismatch("a single grid"));
                }
                Ok(vec!["yearly".to_string()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_is_unsupported() {
        for b in [BaseType::Monthly, BaseType::MeanMonthly] {
            let err = ExportFamily::from_basetype(b, "GeoTIFF").unwrap_err();
            assert!(err.is_unsupported());
        }
        assert_eq!(
            ExportFamily::from_basetype(BaseType::MeanAnnual, "GeoTIFF").unwrap(),
            ExportFamily::MeanAnnual
        );
    }

    #[test]
    fn seasonal_timeframes_carry_year() {
        let axis = TimeAxis::Dates(vec![ymd(1980, 12, 1), ymd(1981, 3, 1), ymd(1981, 9, 1)]);
        let tf = ExportFamily::Seasonal.timeframes(&axis).unwrap();
        assert_eq!(tf, vec!["seasonal-DJF-1980", "seasonal-MAM-1981", "seasonal-SON-1981"]);
    }

    #[test]
    fn mean_seasonal_timeframes() {
        let axis = TimeAxis::Months(vec![3, 6, 9, 12]);
        let tf = ExportFamily::MeanSeasonal.timeframes(&axis).unwrap();
        assert_eq!(tf, vec!["seasonal-MAM", "seasonal-JJA", "seasonal-SON", "seasonal-DJF"]);
    }

    #[test]
    fn bad_season_month_is_reported() {
        let axis = TimeAxis::Months(vec![3, 4]);
        let err = ExportFamily::MeanSeasonal.timeframes(&axis).unwrap_err();
        assert!(matches!(err, ExportError::UnknownSeason { month: 4 }));
    }

    #[test]
    fn annual_timeframes_are_distinct() {
        let axis = TimeAxis::Dates(vec![ymd(1981, 12, 31), ymd(1982, 12, 31)]);
        let tf = ExportFamily::Annual.timeframes(&axis).unwrap();
        assert_eq!(tf, vec!["yearly-1981", "yearly-1982"]);
    }

    #[test]
    fn mean_annual_needs_single_grid() {
        assert_eq!(
            ExportFamily::MeanAnnual.timeframes(&TimeAxis::Collapsed).unwrap(),
            vec!["yearly"]
        );
        let axis = TimeAxis::Dates(vec![ymd(1981, 12, 31), ymd(1982, 12, 31)]);
        assert!(matches!(
            ExportFamily::MeanAnnual.timeframes(&axis),
            Err(ExportError::AxisMismatch { .. })
        ));
    }

    #[test]
    fn axis_kind_mismatch() {
        let err = ExportFamily::MeanSeasonal
            .timeframes(&TimeAxis::Collapsed)
            .unwrap_err();
        assert_eq!(err.to_string(), "'mean_seasonal' export expects a month axis");
    }
}
