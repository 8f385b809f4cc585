//! Day arithmetic in the 365-day (`noleap`) calendar.
//!
//! Climate models frequently run on a calendar without February 29. Every
//! no-leap date is also a valid Gregorian date, so results are returned as
//! [`NaiveDate`]s.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Day-of-year on which each month starts (index 0 unused, index 1 = January).
const MONTH_START_DOY: [u16; 13] = [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Adds `days` to `base` counting 365 days in every year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTimeUnits`] if `base` is February 29
/// (which does not exist in this calendar), or
/// [`CalendarError::DateOverflow`] if the result is not representable.
pub fn noleap_add_days(base: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    if base.month() == 2 && base.day() == 29 {
        return Err(CalendarError::InvalidTimeUnits {
            units: base.to_string(),
            reason: "February 29 does not exist in the noleap calendar".to_string(),
        });
    }

    let base_doy = i64::from(MONTH_START_DOY[base.month() as usize]) + i64::from(base.day()) - 1;
    let total = base_doy - 1 + days;
    let year = i64::from(base.year()) + total.div_euclid(365);
    let doy = (total.rem_euclid(365) + 1) as u16;

    let month = (1..=12)
        .rev()
        .find(|&m| MONTH_START_DOY[m] <= doy)
        .unwrap_or(1);
    let day = u32::from(doy - MONTH_START_DOY[month]) + 1;

    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, day))
        .ok_or_else(|| CalendarError::DateOverflow {
            base: base.to_string(),
            days,
        })
}
