//! Decoding of CF-convention time coordinates.
//!
//! A CF time variable stores numeric offsets together with a `units`
//! attribute of the form `"<unit> since <reference>"` and an optional
//! `calendar` attribute.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::CalendarError;
use crate::noleap::noleap_add_days;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Days => SECONDS_PER_DAY,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => Some(TimeUnit::Days),
            "hours" | "hour" | "hr" | "h" => Some(TimeUnit::Hours),
            "minutes" | "minute" | "min" => Some(TimeUnit::Minutes),
            "seconds" | "second" | "sec" | "s" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

/// Parsed `"<unit> since <reference>"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    unit: TimeUnit,
    reference: NaiveDateTime,
}

impl TimeUnits {
    /// Creates time units directly from their parts.
    pub fn new(unit: TimeUnit, reference: NaiveDateTime) -> Self {
        Self { unit, reference }
    }

    /// Offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Reference instant the offsets count from.
    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }
}

impl FromStr for TimeUnits {
    type Err = CalendarError;

    fn from_str(units: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CalendarError::InvalidTimeUnits {
            units: units.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = units.split_whitespace();
        let unit = parts
            .next()
            .and_then(TimeUnit::parse)
            .ok_or_else(|| invalid("unrecognised unit"))?;
        if parts.next() != Some("since") {
            return Err(invalid("expected '<unit> since <date>'"));
        }

        // The reference may be "YYYY-MM-DD", "YYYY-MM-DD HH:MM:SS" or
        // "YYYY-MM-DDTHH:MM:SS", optionally followed by a time zone token.
        let rest: Vec<&str> = parts.collect();
        let first = rest.first().ok_or_else(|| invalid("missing reference date"))?;
        let (date_str, inline_time) = match first.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (*first, None),
        };
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| invalid(&format!("bad reference date '{date_str}': {e}")))?;

        let time_str = inline_time.or_else(|| rest.get(1).copied());
        let time = match time_str {
            Some(t) if t.contains(':') => parse_time(t.trim_end_matches('Z'))
                .ok_or_else(|| invalid(&format!("bad reference time '{t}'")))?,
            _ => NaiveTime::default(),
        };

        Ok(Self {
            unit,
            reference: date.and_time(time),
        })
    }
}

fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// CF calendars understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CfCalendar {
    /// `standard`, `gregorian` or `proleptic_gregorian`.
    #[default]
    Standard,
    /// `noleap` or `365_day`.
    NoLeap,
}

impl FromStr for CfCalendar {
    type Err = CalendarError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(CfCalendar::Standard),
            "noleap" | "365_day" => Ok(CfCalendar::NoLeap),
            other => Err(CalendarError::UnsupportedCalendar {
                name: other.to_string(),
            }),
        }
    }
}

/// Converts raw time offsets into calendar dates.
///
/// Sub-daily offsets are truncated to the day they fall on.
///
/// # Errors
///
/// Returns [`CalendarError::DateOverflow`] if an offset is non-finite or
/// leaves chrono's representable range.
pub fn decode_time_axis(
    offsets: &[f64],
    units: &TimeUnits,
    calendar: CfCalendar,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let reference = units.reference();
    offsets
        .iter()
        .map(|&offset| {
            let seconds = offset * units.unit().seconds();
            let overflow = || CalendarError::DateOverflow {
                base: reference.to_string(),
                days: (seconds / SECONDS_PER_DAY) as i64,
            };
            if !seconds.is_finite() {
                return Err(overflow());
            }
            match calendar {
                CfCalendar::Standard => {
                    TimeDelta::try_milliseconds((seconds * 1000.0).round() as i64)
                        .and_then(|delta| reference.checked_add_signed(delta))
                        .map(|dt| dt.date())
                        .ok_or_else(overflow)
                }
                CfCalendar::NoLeap => {
                    let since_midnight = f64::from(reference.time().num_seconds_from_midnight());
                    let days = ((since_midnight + seconds) / SECONDS_PER_DAY).floor() as i64;
                    noleap_add_days(reference.date(), days)
                }
            }
        })
        .collect()
}
