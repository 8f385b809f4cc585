//! # swbs-export
//!
//! Writes swbs summaries to disk.
//!
//! ```mermaid
//! flowchart LR
//!     S[summary GridSeries] --> R[export_raster_series]
//!     S --> N[export_netcdf]
//!     S --> Z[zonal_stats] --> P[export_zonal_parquet]
//!     R --> T[(GeoTIFF per step)]
//!     N --> C[(NetCDF)]
//!     P --> Q[(Parquet)]
//! ```
//!
//! Raster and table exports only know how to lay out seasonal and annual
//! summaries; monthly summaries are rejected with
//! [`ExportError::UnsupportedFamily`] before anything is written.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `crs` | EPSG:4326 and EPSG:5070 point transforms |
//! | `reproject` | North-up rasters, nearest-neighbour reprojection |
//! | `geotiff` | LZW GeoTIFF writer |
//! | `naming` | Output filename conventions |
//! | `family` | Per-base-type step naming |
//! | `raster` | GeoTIFF series and NetCDF export |
//! | `zonal` | Zone statistics |
//! | `table` | Parquet export of zone statistics |

mod crs;
mod error;
mod family;
mod geotiff;
mod naming;
mod raster;
mod reproject;
mod table;
mod zonal;

pub use crs::{Crs, transform};
pub use error::ExportError;
pub use family::ExportFamily;
pub use geotiff::write_geotiff;
pub use naming::{OUTPUT_TYPE, OutputNames, raster_filename};
pub use raster::{RasterExportRequest, export_netcdf, export_raster_series};
pub use reproject::{GeoTransform, Raster};
pub use table::{Compression, TableExportRequest, export_zonal_parquet};
pub use zonal::{ZonalRow, ZonalStatsTable, zonal_stats};
