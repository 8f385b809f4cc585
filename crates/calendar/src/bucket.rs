//! Resample buckets for temporal aggregation.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::CalendarError;

/// A temporal resampling frequency.
///
/// Each date belongs to exactly one period; a period is identified by its
/// first day ([`Bucket::period_start`]) and labelled the way the
/// `QS-DEC`, `ME` or `YE` frequency labels it ([`Bucket::label`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Quarters starting in December (`QS-DEC`): DJF, MAM, JJA, SON.
    /// Labelled by the quarter's first day.
    QuarterDec,
    /// Calendar months (`ME`), labelled by the month's last day.
    Month,
    /// Calendar years (`YE`), labelled by December 31.
    Year,
}

impl Bucket {
    /// First day of the period containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::PeriodOutOfRange`] if the period would start
    /// before chrono's earliest date.
    pub fn period_start(self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let (year, month) = match self {
            Bucket::QuarterDec => match date.month() {
                12 => (date.year(), 12),
                1 | 2 => (date.year() - 1, 12),
                m => (date.year(), m - m % 3),
            },
            Bucket::Month => (date.year(), date.month()),
            Bucket::Year => (date.year(), 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range(date))
    }

    /// First day of the period following the one starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::PeriodOutOfRange`] past chrono's last date.
    pub fn next_start(self, start: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let step = match self {
            Bucket::QuarterDec => 3,
            Bucket::Month => 1,
            Bucket::Year => 12,
        };
        start
            .checked_add_months(Months::new(step))
            .ok_or_else(|| out_of_range(start))
    }

    /// Label of the period starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::PeriodOutOfRange`] if the label falls past
    /// chrono's last date.
    pub fn label(self, start: NaiveDate) -> Result<NaiveDate, CalendarError> {
        match self {
            Bucket::QuarterDec => Ok(start),
            // The last day of a month is the day before the next first.
            Bucket::Month => start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .ok_or_else(|| out_of_range(start)),
            Bucket::Year => {
                NaiveDate::from_ymd_opt(start.year(), 12, 31).ok_or_else(|| out_of_range(start))
            }
        }
    }

    /// Contiguous period starts covering `first..=last`, including periods
    /// that contain no dates between the two ends.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::PeriodOutOfRange`] if a period boundary
    /// cannot be represented.
    pub fn periods(
        self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<NaiveDate>, CalendarError> {
        let mut starts = Vec::new();
        if last < first {
            return Ok(starts);
        }
        let end = self.period_start(last)?;
        let mut current = self.period_start(first)?;
        loop {
            starts.push(current);
            if current >= end {
                return Ok(starts);
            }
            current = self.next_start(current)?;
        }
    }
}

fn out_of_range(date: NaiveDate) -> CalendarError {
    CalendarError::PeriodOutOfRange {
        date: date.to_string(),
    }
}
