//! Error types for swbs-summary.

/// Error type for all fallible operations in the swbs-summary crate.
///
/// [`SummaryError::UnknownRecipe`] means the caller asked for something this
/// crate does not do; every other variant is a problem with the data.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Returned when a base type or operation name is not recognised.
    #[error("unknown summary recipe '{basetype}_{operation}'")]
    UnknownRecipe {
        /// Base type as given.
        basetype: String,
        /// Operation as given.
        operation: String,
    },

    /// Returned when the input series has no date axis to resample.
    #[error("series '{variable}' has no date axis to resample")]
    NotATimeSeries {
        /// Variable name of the offending series.
        variable: String,
    },

    /// Returned when a date-range bound cannot be parsed.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate {
        /// The raw date string.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Returned when a summary result lacks one of its naming attributes.
    #[error("summary result has no '{name}' attribute")]
    MissingMetadata {
        /// Attribute name.
        name: String,
    },

    /// Wraps an error originating from the swbs-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the swbs-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl SummaryError {
    /// Returns `true` if the request named an unsupported recipe rather than
    /// hitting a data problem.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, SummaryError::UnknownRecipe { .. })
    }
}

impl From<swbs_grid::GridError> for SummaryError {
    fn from(e: swbs_grid::GridError) -> Self {
        SummaryError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<swbs_calendar::CalendarError> for SummaryError {
    fn from(e: swbs_calendar::CalendarError) -> Self {
        SummaryError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_recipe() {
        let err = SummaryError::UnknownRecipe {
            basetype: "decadal".into(),
            operation: "sum".into(),
        };
        assert_eq!(err.to_string(), "unknown summary recipe 'decadal_sum'");
        assert!(err.is_unsupported());
    }

    #[test]
    fn display_not_a_time_series() {
        let err = SummaryError::NotATimeSeries {
            variable: "precip".into(),
        };
        assert_eq!(err.to_string(), "series 'precip' has no date axis to resample");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn from_grid_error() {
        let grid = swbs_grid::GridError::EmptySelection {
            start: "..".into(),
            end: "1900-01-01".into(),
        };
        let err: SummaryError = grid.into();
        assert!(matches!(err, SummaryError::Grid { .. }));
        assert!(err.to_string().contains("1900-01-01"));
    }

    #[test]
    fn from_calendar_error() {
        let cal = swbs_calendar::CalendarError::PeriodOutOfRange {
            date: "+262142-12-01".into(),
        };
        let err: SummaryError = cal.into();
        assert!(matches!(err, SummaryError::Calendar { .. }));
        assert!(!err.is_unsupported());
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<SummaryError>();
    }
}
