//! Identifier case conversion.
//!
//! The rules are plain character-class substitutions: every ASCII capital
//! starts a new word in camelCase, and every `_` followed by a lowercase
//! ASCII letter starts a new word in snake_case. Anything else passes
//! through untouched, so the functions are total over arbitrary strings.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])").expect("valid camel boundary pattern"));
static UNDERSCORE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([a-z])").expect("valid underscore boundary pattern"));

/// `soilStorageMax` -> `soil_storage_max`.
pub fn camel_to_underscore(name: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(name, |caps: &Captures| format!("_{}", caps[1].to_lowercase()))
        .into_owned()
}

/// `soil_storage_max` -> `soilStorageMax`.
pub fn underscore_to_camel(name: &str) -> String {
    UNDERSCORE_BOUNDARY
        .replace_all(name, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// `soil_storage_max` -> `soil-storage-max`.
///
/// Only underscores followed by a lowercase letter are replaced; `a_1`
/// and `a__b` keep their first underscore.
pub fn underscore_to_kebab(name: &str) -> String {
    UNDERSCORE_BOUNDARY
        .replace_all(name, |caps: &Captures| format!("-{}", &caps[1]))
        .into_owned()
}
