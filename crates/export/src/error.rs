//! Error types for swbs-export.

use std::path::PathBuf;

/// Error type for all fallible operations in the swbs-export crate.
///
/// [`ExportError::UnsupportedFamily`] and [`ExportError::UnsupportedCrs`]
/// mean the request asked for something this crate does not do and no file
/// was written; the remaining variants are data or I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Returned when a summary base type has no export layout.
    #[error("cannot export '{basetype}' summaries to {target}")]
    UnsupportedFamily {
        /// Base type as named in the summary attributes.
        basetype: String,
        /// Output kind that was requested.
        target: &'static str,
    },

    /// Returned when a slice's month does not start a season.
    #[error("no season starts in month {month}")]
    UnknownSeason {
        /// Month carried by the offending slice.
        month: u32,
    },

    /// Returned when an EPSG code has no built-in projection.
    #[error("unsupported coordinate reference system EPSG:{epsg}")]
    UnsupportedCrs {
        /// Requested EPSG code.
        epsg: u32,
    },

    /// Returned when the series' time axis does not suit the export family.
    #[error("'{family}' export expects {expected}")]
    AxisMismatch {
        /// Export family name.
        family: &'static str,
        /// Description of the expected axis.
        expected: &'static str,
    },

    /// Returned when a zone grid does not match the summary grid.
    #[error("zone grid is {got_rows}x{got_cols}, summary grid is {rows}x{cols}")]
    ZoneShape {
        rows: usize,
        cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    /// Wraps a filesystem failure.
    #[error("I/O error at {}: {reason}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the TIFF encoder.
    #[error("tiff error: {reason}")]
    Tiff {
        /// Description of the underlying TIFF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps an error originating from the swbs-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl ExportError {
    /// Returns `true` if the request itself is unsupported and nothing was
    /// written.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ExportError::UnsupportedFamily { .. } | ExportError::UnsupportedCrs { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}

impl From<tiff::TiffError> for ExportError {
    fn from(e: tiff::TiffError) -> Self {
        ExportError::Tiff {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for ExportError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        ExportError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for ExportError {
    fn from(e: arrow::error::ArrowError) -> Self {
        ExportError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<swbs_grid::GridError> for ExportError {
    fn from(e: swbs_grid::GridError) -> Self {
        ExportError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<swbs_calendar::CalendarError> for ExportError {
    fn from(e: swbs_calendar::CalendarError) -> Self {
        match e {
            swbs_calendar::CalendarError::NotASeasonStart { month } => {
                ExportError::UnknownSeason { month }
            }
            other => ExportError::Grid {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_family_display() {
        let err = ExportError::UnsupportedFamily {
            basetype: "monthly".into(),
            target: "GeoTIFF",
        };
        assert_eq!(err.to_string(), "cannot export 'monthly' summaries to GeoTIFF");
        assert!(err.is_unsupported());
    }

    #[test]
    fn unknown_season_display() {
        let err = ExportError::UnknownSeason { month: 4 };
        assert_eq!(err.to_string(), "no season starts in month 4");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn season_errors_map_to_unknown_season() {
        let err: ExportError = swbs_calendar::CalendarError::NotASeasonStart { month: 7 }.into();
        assert!(matches!(err, ExportError::UnknownSeason { month: 7 }));
    }

    #[test]
    fn crs_is_unsupported() {
        assert!(ExportError::UnsupportedCrs { epsg: 3857 }.is_unsupported());
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ExportError>();
    }
}
