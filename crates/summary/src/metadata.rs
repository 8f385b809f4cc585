//! Descriptive attributes carried by every summary result.

use std::path::{Path, PathBuf};

use swbs_grid::GridSeries;

use crate::error::SummaryError;
use crate::recipe::Recipe;

pub(crate) const ATTR_VARIABLE: &str = "swb_variable_name";
pub(crate) const ATTR_BASETYPE: &str = "summary_basetype";
pub(crate) const ATTR_OPERATION: &str = "variable_operation";
pub(crate) const ATTR_WEATHER: &str = "weather_data_name";
pub(crate) const ATTR_SCENARIO: &str = "scenario_name";
pub(crate) const ATTR_UNITS: &str = "units";
pub(crate) const ATTR_SOURCE: &str = "original_source_filename";

/// The naming metadata that travels from the source file, through the
/// summary, into output filenames.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetadata {
    pub variable: String,
    pub recipe: Recipe,
    pub weather_data_name: String,
    pub scenario_name: String,
    pub units: String,
    pub source: PathBuf,
}

impl SummaryMetadata {
    /// Attribute names in the order they are written.
    pub const ATTRIBUTE_NAMES: [&'static str; 7] = [
        ATTR_VARIABLE,
        ATTR_BASETYPE,
        ATTR_OPERATION,
        ATTR_WEATHER,
        ATTR_SCENARIO,
        ATTR_UNITS,
        ATTR_SOURCE,
    ];

    /// Writes all seven attributes onto `series`, replacing existing values.
    pub fn apply(&self, series: &mut GridSeries) {
        series.set_attr(ATTR_VARIABLE, self.variable.as_str());
        series.set_attr(ATTR_BASETYPE, self.recipe.basetype().as_str());
        series.set_attr(ATTR_OPERATION, self.recipe.operation().as_str());
        series.set_attr(ATTR_WEATHER, self.weather_data_name.as_str());
        series.set_attr(ATTR_SCENARIO, self.scenario_name.as_str());
        series.set_attr(ATTR_UNITS, self.units.as_str());
        series.set_attr(ATTR_SOURCE, self.source.to_string_lossy());
    }

    /// Reads the attributes back from a summary result.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::MissingMetadata`] naming the first absent
    /// attribute, or [`SummaryError::UnknownRecipe`] if the recipe
    /// attributes do not name a valid recipe.
    pub fn from_series(series: &GridSeries) -> Result<Self, SummaryError> {
        let get = |name: &str| {
            series
                .attr(name)
                .map(str::to_string)
                .ok_or_else(|| SummaryError::MissingMetadata {
                    name: name.to_string(),
                })
        };
        let recipe = Recipe::parse(&get(ATTR_BASETYPE)?, &get(ATTR_OPERATION)?)?;
        Ok(Self {
            variable: get(ATTR_VARIABLE)?,
            recipe,
            weather_data_name: get(ATTR_WEATHER)?,
            scenario_name: get(ATTR_SCENARIO)?,
            units: get(ATTR_UNITS)?,
            source: PathBuf::from(get(ATTR_SOURCE)?),
        })
    }

    /// Path of the file the summary was computed from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}
