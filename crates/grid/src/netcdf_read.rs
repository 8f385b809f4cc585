//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;

use crate::error::GridError;

/// Open a NetCDF file at `path`, returning [`GridError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, GridError> {
    if !path.exists() {
        return Err(GridError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`GridError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, GridError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(GridError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read an `N`-dimensional `f64` variable and return the flattened data
/// together with its dimension lengths.
///
/// Values equal to the variable's `_FillValue` or `missing_value` are
/// replaced with NaN.
pub(crate) fn read_nd_f64<const N: usize>(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; N]), GridError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| GridError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != N {
        return Err(GridError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: N,
            got: dims.len(),
        });
    }
    let mut shape = [0usize; N];
    for (s, d) in shape.iter_mut().zip(dims) {
        *s = d.len();
    }

    let mut data = var.get_values::<f64, _>(..)?;

    let fills: Vec<f64> = ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| numeric_attribute(&var, name))
        .collect();
    if !fills.is_empty() {
        for v in &mut data {
            if fills.iter().any(|f| *v == *f) {
                *v = f64::NAN;
            }
        }
    }

    Ok((data, shape))
}

/// Read a string attribute from a variable.
pub(crate) fn string_attribute(
    file: &netcdf::File,
    var_name: &str,
    attr: &str,
) -> Result<String, GridError> {
    let missing = || GridError::MissingAttribute {
        name: attr.to_string(),
        variable: var_name.to_string(),
    };
    let var = file.variable(var_name).ok_or_else(missing)?;
    match var.attribute_value(attr) {
        Some(Ok(AttributeValue::Str(s))) => Ok(s),
        Some(Ok(AttributeValue::Strs(mut v))) if !v.is_empty() => Ok(v.swap_remove(0)),
        _ => Err(missing()),
    }
}

/// Optional string attribute; `None` when absent or not a string.
pub(crate) fn optional_string_attribute(
    file: &netcdf::File,
    var_name: &str,
    attr: &str,
) -> Option<String> {
    string_attribute(file, var_name, attr).ok()
}

/// Scalar numeric attribute value widened to `f64`.
fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    let value = var.attribute_value(name)?.ok()?;
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&f| f64::from(f)),
        _ => None,
    }
}
