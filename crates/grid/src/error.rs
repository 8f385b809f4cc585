//! Error types for swbs-grid.

use std::path::PathBuf;

/// Error type for all fallible operations in the swbs-grid crate.
///
/// Covers missing files and variables, NetCDF library failures, time-axis
/// decoding problems, and arrays whose shape disagrees with their axes.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the swbs-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required attribute is absent or not a string.
    #[error("variable '{variable}' has no usable '{name}' attribute")]
    MissingAttribute {
        /// Attribute name.
        name: String,
        /// Variable the attribute was looked up on.
        variable: String,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a date range selects no time steps.
    #[error("no time steps between {start} and {end}")]
    EmptySelection {
        /// Lower bound as given (or `..` when open).
        start: String,
        /// Upper bound as given (or `..` when open).
        end: String,
    },
}

impl From<netcdf::Error> for GridError {
    fn from(e: netcdf::Error) -> Self {
        GridError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<swbs_calendar::CalendarError> for GridError {
    fn from(e: swbs_calendar::CalendarError) -> Self {
        GridError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = GridError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_missing_variable() {
        let err = GridError::MissingVariable {
            name: "net_infiltration".to_string(),
            path: PathBuf::from("/data/swb.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'net_infiltration' not found in /data/swb.nc"
        );
    }

    #[test]
    fn display_missing_attribute() {
        let err = GridError::MissingAttribute {
            name: "units".to_string(),
            variable: "precip".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable 'precip' has no usable 'units' attribute"
        );
    }

    #[test]
    fn display_empty_selection() {
        let err = GridError::EmptySelection {
            start: "2050-01-01".to_string(),
            end: "..".to_string(),
        };
        assert_eq!(err.to_string(), "no time steps between 2050-01-01 and ..");
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: GridError = nc_err.into();
        assert!(matches!(err, GridError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_calendar_error() {
        let cal_err = swbs_calendar::CalendarError::UnsupportedCalendar {
            name: "360_day".into(),
        };
        let err: GridError = cal_err.into();
        assert!(matches!(err, GridError::Calendar { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GridError>();
    }
}
