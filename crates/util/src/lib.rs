//! # swbs-util
//!
//! Small helpers shared by the swbs binary: identifier case conversion
//! between `camelCase`, `snake_case` and `kebab-case`, and loading a TOML
//! file into an untyped [`toml::Table`].

mod case;
mod config;
mod error;

pub use case::{camel_to_underscore, underscore_to_camel, underscore_to_kebab};
pub use config::read_toml_file;
pub use error::UtilError;
