//! Meteorological seasons keyed by the month a quarter starts in.

use std::fmt;

use crate::error::CalendarError;

/// A three-month meteorological season.
///
/// Quarters are anchored on December, so each season is identified by the
/// month its quarter starts in: 12 (DJF), 3 (MAM), 6 (JJA) and 9 (SON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Fall,
}

impl Season {
    /// All seasons in the order their quarters start within a calendar year.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Looks up the season whose quarter starts in `month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NotASeasonStart`] for any month other than
    /// 12, 3, 6 or 9.
    pub fn from_start_month(month: u32) -> Result<Self, CalendarError> {
        match month {
            12 => Ok(Season::Winter),
            3 => Ok(Season::Spring),
            6 => Ok(Season::Summer),
            9 => Ok(Season::Fall),
            _ => Err(CalendarError::NotASeasonStart { month }),
        }
    }

    /// Month the season's quarter starts in.
    pub fn start_month(self) -> u32 {
        match self {
            Season::Winter => 12,
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Fall => 9,
        }
    }

    /// Lower-case name, e.g. `"winter"`.
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Three-letter month initials, e.g. `"DJF"`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Season::Winter => "DJF",
            Season::Spring => "MAM",
            Season::Summer => "JJA",
            Season::Fall => "SON",
        }
    }

    /// Raster timeframe token, e.g. `"seasonal-DJF"`.
    pub fn timeframe(self) -> String {
        format!("seasonal-{}", self.abbreviation())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
