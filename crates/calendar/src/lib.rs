//! # swbs-calendar
//!
//! Calendar logic shared by the summary builder and the exporters: the
//! meteorological seasons, the resample buckets used to aggregate daily
//! data, and decoding of CF-convention time axes.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CF time units + offsets"] -->|"decode_time_axis()"| B["Vec of NaiveDate"]
//!     B -->|"Bucket::period_start()"| C["period start"]
//!     C -->|"Bucket::label()"| D["period label (QS / ME / YE)"]
//!     C -->|".month()"| E["Season::from_start_month()"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use swbs_calendar::{Bucket, Season};
//!
//! let d = NaiveDate::from_ymd_opt(1981, 1, 15).unwrap();
//! let start = Bucket::QuarterDec.period_start(d)?; // 1980-12-01
//! assert_eq!(Season::from_start_month(12).unwrap(), Season::Winter);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `season` | DJF/MAM/JJA/SON seasons and their labels |
//! | `bucket` | Resample buckets (quarter-from-December, month, year) |
//! | `noleap` | Day arithmetic in the 365-day calendar |
//! | `time_units` | CF `"<unit> since <date>"` decoding |
//! | `error` | Error types |

mod bucket;
mod error;
mod noleap;
mod season;
mod time_units;

pub use bucket::Bucket;
pub use error::CalendarError;
pub use noleap::noleap_add_days;
pub use season::Season;
pub use time_units::{CfCalendar, TimeUnit, TimeUnits, decode_time_axis};
