//! Output filename conventions.
//!
//! Rasters follow the CMIP6 derived-product convention
//! `{scenario}_{timeperiod}_{model}_modelVal_{timeframe}_{variable}-{unit}.tif`,
//! e.g. `historical_1983-1996_ensemble_modelVal_yearly_precip-inches.tif`.
//! Zonal tables and whole-dataset NetCDF files share the stem
//! `{timeperiod}__{basetype}_{operation}__{scenario}__{model}__{variable}`.

use swbs_summary::{Recipe, SummaryMetadata};

/// Output type token in raster filenames.
pub const OUTPUT_TYPE: &str = "modelVal";

/// The naming fields shared by every output of one summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNames {
    pub scenario: String,
    pub time_period: String,
    pub model: String,
    pub variable: String,
    pub recipe: Recipe,
}

impl OutputNames {
    pub fn new(
        scenario: impl Into<String>,
        time_period: impl Into<String>,
        model: impl Into<String>,
        variable: impl Into<String>,
        recipe: Recipe,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            time_period: time_period.into(),
            model: model.into(),
            variable: variable.into(),
            recipe,
        }
    }

    /// Names taken from a summary's metadata; the time period is not part
    /// of the metadata and must be supplied.
    pub fn from_metadata(meta: &SummaryMetadata, time_period: impl Into<String>) -> Self {
        Self::new(
            meta.scenario_name.as_str(),
            time_period,
            meta.weather_data_name.as_str(),
            meta.variable.as_str(),
            meta.recipe,
        )
    }

    pub fn raster_filename(&self, timeframe: &str, unit: &str) -> String {
        raster_filename(
            &self.scenario,
            &self.time_period,
            &self.model,
            timeframe,
            &self.variable,
            unit,
        )
    }

    pub fn table_filename(&self) -> String {
        format!("{}.parquet", self.stem())
    }

    /// Filename for the whole summary written as one NetCDF dataset.
    pub fn dataset_filename(&self) -> String {
        format!("{}.nc", self.stem())
    }

    fn stem(&self) -> String {
        format!(
            "{}__{}__{}__{}__{}",
            self.time_period, self.recipe, self.scenario, self.model, self.variable
        )
    }
}

pub fn raster_filename(
    scenario: &str,
    time_period: &str,
    model: &str,
    timeframe: &str,
    variable: &str,
    unit: &str,
) -> String {
    format!("{scenario}_{time_period}_{model}_{OUTPUT_TYPE}_{timeframe}_{variable}-{unit}.tif")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn raster_name_yearly() {
        assert_eq!(
            raster_filename("RCP4.5", "2043-2056", "CNRM", "yearly", "precip", "inches"),
            "RCP4.5_2043-2056_CNRM_modelVal_yearly_precip-inches.tif"
        );
    }

    #[test]
    fn table_name_uses_recipe() {
        let names = OutputNames::new(
            "historical",
            "1983-1996",
            "ensemble",
            "net_infiltration",
            "mean_seasonal_sum".parse().unwrap(),
        );
        assert_eq!(
            names.table_filename(),
            "1983-1996__mean_seasonal_sum__historical__ensemble__net_infiltration.parquet"
        );
        assert_eq!(
            names.dataset_filename(),
            "1983-1996__mean_seasonal_sum__historical__ensemble__net_infiltration.nc"
        );
    }

    #[test]
    fn names_from_metadata() {
        let meta = SummaryMetadata {
            variable: "precip".into(),
            recipe: "annual_sum".parse().unwrap(),
            weather_data_name: "CNRM".into(),
            scenario_name: "RCP4.5".into(),
            units: "inches".into(),
            source: PathBuf::from("precip.nc"),
        };
        let names = OutputNames::from_metadata(&meta, "2043-2056");
        assert_eq!(
            names.raster_filename("yearly-2050", &meta.units),
            "RCP4.5_2043-2056_CNRM_modelVal_yearly-2050_precip-inches.tif"
        );
    }
}
