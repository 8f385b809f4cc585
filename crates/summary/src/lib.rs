//! # swbs-summary
//!
//! Turns a daily gridded series into seasonal, monthly or annual summary
//! grids. A [`Recipe`] pairs a [`BaseType`] (which periods, and whether to
//! average them across years) with an [`Operation`] (sum or mean); each of
//! the twelve combinations maps to a fixed resample bucket, reduction and
//! optional second pass.
//!
//! | Base type | Bucket | Second pass |
//! |-----------|--------|-------------|
//! | `seasonal` | quarters from December | none |
//! | `mean_seasonal` | quarters from December | mean per quarter-start month |
//! | `monthly` | calendar month | none |
//! | `mean_monthly` | calendar month | mean per month |
//! | `annual` | calendar year | none |
//! | `mean_annual` | calendar year | mean over all years |

mod builder;
mod error;
mod metadata;
mod recipe;
mod reduce;

pub use builder::{SummaryRequest, build_summary, summarize};
pub use error::SummaryError;
pub use metadata::SummaryMetadata;
pub use recipe::{BaseType, Operation, Recipe, Reduction, SecondPass};
pub use reduce::{group_by_month, mean_over_time, resample};
