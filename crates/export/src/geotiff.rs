//! LZW-compressed single-band GeoTIFF writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::compression::Lzw;
use tiff::tags::Tag;

use crate::crs::Crs;
use crate::error::ExportError;
use crate::reproject::Raster;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GDAL_NODATA: u16 = 42113;

/// GeoKeyDirectoryTag contents for `crs`: version 1.1.0 followed by
/// model type, raster type (pixel is area) and the EPSG code.
pub(crate) fn geokeys(crs: Crs) -> [u16; 16] {
    let epsg = crs.epsg() as u16;
    let (model_type, crs_key) = if crs.is_geographic() {
        (2, 2048)
    } else {
        (1, 3072)
    };
    [
        1, 1, 0, 3, //
        1024, 0, 1, model_type, //
        1025, 0, 1, 1, //
        crs_key, 0, 1, epsg,
    ]
}

/// Writes `raster` to `path` as a 32-bit float GeoTIFF with LZW
/// compression. NaN cells are declared as nodata.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created and
/// [`ExportError::Tiff`] if encoding fails.
pub fn write_geotiff(raster: &Raster, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;

    let (rows, cols) = raster.shape();
    let data: Vec<f32> = raster.data().iter().map(|&v| v as f32).collect();

    let mut image = encoder.new_image_with_compression::<Gray32Float, _>(
        cols as u32,
        rows as u32,
        Lzw::default(),
    )?;

    let gt = raster.transform();
    let scale = [gt.pixel_width, gt.pixel_height.abs(), 0.0];
    let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    let keys = geokeys(raster.crs());

    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), &scale[..])?;
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_TIEPOINT), &tiepoint[..])?;
    image
        .encoder()
        .write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), &keys[..])?;
    image.encoder().write_tag(Tag::Unknown(GDAL_NODATA), "nan")?;

    image.write_data(&data)?;
    Ok(())
}
