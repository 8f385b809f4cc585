//! Untyped TOML loading.

use std::path::Path;

use tracing::debug;

use crate::error::UtilError;

/// Read `path` and parse it as a TOML document.
///
/// No schema is imposed; callers deserialize the returned table into
/// whatever typed structure they expect.
///
/// # Errors
///
/// Returns [`UtilError::Io`] if the file cannot be read and
/// [`UtilError::Toml`] if it is not valid TOML.
pub fn read_toml_file(path: &Path) -> Result<toml::Table, UtilError> {
    let text = std::fs::read_to_string(path).map_err(|e| UtilError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let table: toml::Table = text.parse().map_err(|e: toml::de::Error| UtilError::Toml {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })?;
    debug!(path = %path.display(), n_keys = table.len(), "read TOML file");
    Ok(table)
}
