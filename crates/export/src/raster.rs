//! Raster-series and whole-dataset export.

use std::fs;
use std::path::{Path, PathBuf};

use swbs_grid::{GridSeries, write_netcdf};
use tracing::{debug, info};

use crate::crs::Crs;
use crate::error::ExportError;
use crate::family::ExportFamily;
use crate::geotiff::write_geotiff;
use crate::naming::OutputNames;
use crate::reproject::Raster;

// ---------------------------------------------------------------------------
// RasterExportRequest
// ---------------------------------------------------------------------------

/// Where and how to write one summary as a series of GeoTIFFs.
///
/// The source grid is assumed to be in EPSG:5070 and is reprojected to
/// EPSG:4326 unless overridden with [`RasterExportRequest::with_crs`].
#[derive(Debug, Clone)]
pub struct RasterExportRequest {
    names: OutputNames,
    output_dir: PathBuf,
    from_epsg: u32,
    to_epsg: u32,
}

impl RasterExportRequest {
    pub fn new(names: OutputNames, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            names,
            output_dir: output_dir.into(),
            from_epsg: 5070,
            to_epsg: 4326,
        }
    }

    pub fn with_crs(mut self, from_epsg: u32, to_epsg: u32) -> Self {
        self.from_epsg = from_epsg;
        self.to_epsg = to_epsg;
        self
    }

    pub fn names(&self) -> &OutputNames {
        &self.names
    }
}

// ---------------------------------------------------------------------------
// export_raster_series
// ---------------------------------------------------------------------------

/// Writes one LZW-compressed GeoTIFF per step of `result`.
///
/// Timeframes and both coordinate systems are resolved before the first
/// file is written, so a rejected request leaves the output directory
/// untouched. Returns the written paths in step order.
///
/// # Errors
///
/// Returns [`ExportError::UnsupportedFamily`] for monthly summaries,
/// [`ExportError::UnsupportedCrs`] for unknown EPSG codes,
/// [`ExportError::UnknownSeason`] for a seasonal step that does not start a
/// season, and I/O or TIFF errors from writing.
pub fn export_raster_series(
    result: &GridSeries,
    request: &RasterExportRequest,
) -> Result<Vec<PathBuf>, ExportError> {
    let family = ExportFamily::from_basetype(request.names.recipe.basetype(), "GeoTIFF")?;
    let from = Crs::from_epsg(request.from_epsg)?;
    let to = Crs::from_epsg(request.to_epsg)?;
    let timeframes = family.timeframes(result.time())?;

    fs::create_dir_all(&request.output_dir)
        .map_err(|e| ExportError::io(&request.output_dir, e))?;

    let mut written = Vec::with_capacity(timeframes.len());
    for (step, timeframe) in timeframes.iter().enumerate() {
        let raster =
            Raster::from_grid(result.slice(step), result.x(), result.y(), from).reproject(to);
        let filename = request.names.raster_filename(timeframe, result.units());
        let path = request.output_dir.join(filename);
        write_geotiff(&raster, &path)?;
        debug!(path = %path.display(), %timeframe, "wrote GeoTIFF");
        written.push(path);
    }

    info!(
        family = family.name(),
        n_files = written.len(),
        dir = %request.output_dir.display(),
        from_epsg = request.from_epsg,
        to_epsg = request.to_epsg,
        "exported raster series"
    );
    Ok(written)
}

// ---------------------------------------------------------------------------
// export_netcdf
// ---------------------------------------------------------------------------

/// Writes the whole summary, attributes included, to one NetCDF file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the parent directory cannot be created
/// and [`ExportError::Grid`] if the NetCDF write fails.
pub fn export_netcdf(result: &GridSeries, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    write_netcdf(result, path)?;
    Ok(())
}
