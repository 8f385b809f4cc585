//! # swbs-grid
//!
//! In-memory model for gridded time series (`time x y x x`) and the NetCDF
//! reader/writer that moves them on and off disk. Everything downstream
//! (summaries, rasters, tables) works on [`GridSeries`].

mod error;
mod netcdf_read;
mod reader;
mod series;
mod writer;

pub use error::GridError;
pub use reader::{ReaderConfig, read_grid_series, read_zones};
pub use series::{GridSeries, TimeAxis};
pub use writer::write_netcdf;
