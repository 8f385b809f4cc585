use chrono::NaiveDate;
use swbs_calendar::{CfCalendar, TimeUnit, TimeUnits, decode_time_axis, noleap_add_days};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn decade_of_daily_noleap_steps_has_no_february_29() {
    let units: TimeUnits = "days since 1981-01-01".parse().unwrap();
    let offsets: Vec<f64> = (0..3650).map(f64::from).collect();
    let dates = decode_time_axis(&offsets, &units, CfCalendar::NoLeap).unwrap();

    assert_eq!(dates.first(), Some(&ymd(1981, 1, 1)));
    assert_eq!(dates.last(), Some(&ymd(1990, 12, 31)));
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(!dates.contains(&ymd(1984, 2, 29)));
}

#[test]
fn standard_calendar_keeps_leap_days() {
    let units: TimeUnits = "days since 1984-02-28".parse().unwrap();
    let dates = decode_time_axis(&[0.0, 1.0, 2.0], &units, CfCalendar::Standard).unwrap();
    assert_eq!(dates, vec![ymd(1984, 2, 28), ymd(1984, 2, 29), ymd(1984, 3, 1)]);
}

#[test]
fn negative_offsets_count_backwards() {
    let units = TimeUnits::new(TimeUnit::Days, ymd(1981, 1, 1).and_hms_opt(0, 0, 0).unwrap());
    let dates = decode_time_axis(&[-1.0, -365.0], &units, CfCalendar::NoLeap).unwrap();
    assert_eq!(dates, vec![ymd(1980, 12, 31), ymd(1980, 1, 1)]);
}

#[test]
fn noleap_addition_wraps_years() {
    assert_eq!(noleap_add_days(ymd(1981, 12, 31), 1).unwrap(), ymd(1982, 1, 1));
    assert_eq!(noleap_add_days(ymd(1984, 2, 28), 1).unwrap(), ymd(1984, 3, 1));
    assert!(noleap_add_days(ymd(1984, 2, 29), 1).is_err());
}

#[test]
fn hourly_offsets_truncate_to_the_day() {
    let units: TimeUnits = "hours since 1981-01-01 00:00:00".parse().unwrap();
    let dates = decode_time_axis(&[0.0, 23.0, 24.0], &units, CfCalendar::Standard).unwrap();
    assert_eq!(dates, vec![ymd(1981, 1, 1), ymd(1981, 1, 1), ymd(1981, 1, 2)]);
}
