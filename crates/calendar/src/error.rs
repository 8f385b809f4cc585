//! Error types for the swbs-calendar crate.

/// Error type for all fallible operations in the swbs-calendar crate.
///
/// Covers unknown season months and failures while decoding CF-convention
/// time axes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month is not the first month of a DJF/MAM/JJA/SON season.
    #[error("month {month} does not start a season (expected 12, 3, 6 or 9)")]
    NotASeasonStart {
        /// The month that was looked up.
        month: u32,
    },

    /// Returned when a CF `units` string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidTimeUnits {
        /// The raw units string.
        units: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned for CF calendars that are not supported.
    #[error("unsupported calendar '{name}'")]
    UnsupportedCalendar {
        /// The calendar attribute value.
        name: String,
    },

    /// Returned when date arithmetic leaves chrono's representable range.
    #[error("date overflow adding {days} days to {base}")]
    DateOverflow {
        /// Base date of the addition.
        base: String,
        /// Number of days added.
        days: i64,
    },

    /// Returned when a resample period boundary falls outside chrono's
    /// representable range.
    #[error("no resample period boundary representable near {date}")]
    PeriodOutOfRange {
        /// Date whose period could not be computed.
        date: String,
    },
}
