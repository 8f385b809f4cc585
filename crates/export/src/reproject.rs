//! North-up rasters and nearest-neighbour reprojection.

use ndarray::{Array2, ArrayView2, s};

use crate::crs::{Crs, transform};

/// Affine mapping from pixel indices to map coordinates for a north-up
/// grid. `origin_*` is the outer corner of pixel (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    /// Negative for north-up rasters.
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Map coordinates of the centre of pixel `(row, col)`.
    pub fn pixel_centre(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y + (row as f64 + 0.5) * self.pixel_height,
        )
    }

    /// Pixel `(row, col)` containing `(x, y)`, if inside a `rows x cols`
    /// grid.
    pub fn pixel_at(&self, x: f64, y: f64, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let c = ((x - self.origin_x) / self.pixel_width).floor();
        let r = ((y - self.origin_y) / self.pixel_height).floor();
        if !(c.is_finite() && r.is_finite()) || c < 0.0 || r < 0.0 {
            return None;
        }
        let (r, c) = (r as usize, c as usize);
        (r < rows && c < cols).then_some((r, c))
    }
}

/// Spacing of regularly spaced cell centres; 1.0 for a single cell.
fn spacing(centres: &[f64]) -> f64 {
    match centres {
        [first, .., last] => ((last - first) / (centres.len() - 1) as f64).abs(),
        _ => 1.0,
    }
}

/// One georeferenced grid, row 0 at the north edge.
#[derive(Debug, Clone)]
pub struct Raster {
    data: Array2<f64>,
    transform: GeoTransform,
    crs: Crs,
}

impl Raster {
    pub fn new(data: Array2<f64>, transform: GeoTransform, crs: Crs) -> Self {
        Self {
            data,
            transform,
            crs,
        }
    }

    /// Builds a raster from a `[y, x]` grid and its cell-centre
    /// coordinates, flipping axes as needed so rows run north to south and
    /// columns west to east.
    pub fn from_grid(grid: ArrayView2<'_, f64>, x: &[f64], y: &[f64], crs: Crs) -> Self {
        let y_ascending = matches!(y, [first, .., last] if last > first);
        let x_descending = matches!(x, [first, .., last] if last < first);

        let oriented = match (y_ascending, x_descending) {
            (true, true) => grid.slice(s![..;-1, ..;-1]).to_owned(),
            (true, false) => grid.slice(s![..;-1, ..]).to_owned(),
            (false, true) => grid.slice(s![.., ..;-1]).to_owned(),
            (false, false) => grid.to_owned(),
        };

        let (dx, dy) = (spacing(x), spacing(y));
        let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let transform = GeoTransform::new(x_min - dx / 2.0, y_max + dy / 2.0, dx, -dy);

        Self::new(oriented, transform, crs)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Resamples into `to`, keeping the pixel dimensions.
    ///
    /// The destination extent is the envelope of the source boundary
    /// transformed into `to`. Each destination pixel takes the value of the
    /// source pixel under its centre, or NaN outside the source.
    pub fn reproject(&self, to: Crs) -> Raster {
        if to == self.crs {
            return self.clone();
        }

        let (rows, cols) = self.shape();
        let (min_x, min_y, max_x, max_y) = self.envelope_in(to);
        let pw = (max_x - min_x) / cols as f64;
        let ph = (max_y - min_y) / rows as f64;
        let dst = GeoTransform::new(min_x, max_y, pw, -ph);

        let data = Array2::from_shape_fn((rows, cols), |(r, c)| {
            let (x, y) = dst.pixel_centre(r, c);
            let (sx, sy) = transform(to, self.crs, x, y);
            match self.transform.pixel_at(sx, sy, rows, cols) {
                Some(idx) => self.data[idx],
                None => f64::NAN,
            }
        });

        Raster::new(data, dst, to)
    }

    /// Bounding box of this raster's outer edge expressed in `to`, sampled
    /// at every pixel corner along the boundary.
    fn envelope_in(&self, to: Crs) -> (f64, f64, f64, f64) {
        let (rows, cols) = self.shape();
        let gt = &self.transform;
        let corner = |r: usize, c: usize| {
            (
                gt.origin_x + c as f64 * gt.pixel_width,
                gt.origin_y + r as f64 * gt.pixel_height,
            )
        };

        let edge = (0..=cols)
            .flat_map(|c| [corner(0, c), corner(rows, c)])
            .chain((0..=rows).flat_map(|r| [corner(r, 0), corner(r, cols)]));

        let mut env = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in edge {
            let (tx, ty) = transform(self.crs, to, x, y);
            if tx.is_finite() && ty.is_finite() {
                env.0 = env.0.min(tx);
                env.1 = env.1.min(ty);
                env.2 = env.2.max(tx);
                env.3 = env.3.max(ty);
            }
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn from_grid_flips_ascending_y() {
        let grid = array![[1.0, 2.0], [3.0, 4.0]];
        let r = Raster::from_grid(grid.view(), &[10.0, 20.0], &[100.0, 200.0], Crs::ConusAlbers);
        // Row 0 is now y = 200.
        assert_eq!(r.data(), &array![[3.0, 4.0], [1.0, 2.0]]);
        assert_eq!(*r.transform(), GeoTransform::new(5.0, 250.0, 10.0, -100.0));
    }

    #[test]
    fn from_grid_keeps_descending_y() {
        let grid = array![[1.0, 2.0], [3.0, 4.0]];
        let r = Raster::from_grid(grid.view(), &[10.0, 20.0], &[200.0, 100.0], Crs::ConusAlbers);
        assert_eq!(r.data(), &grid);
    }

    #[test]
    fn pixel_lookup() {
        let gt = GeoTransform::new(0.0, 100.0, 10.0, -10.0);
        assert_eq!(gt.pixel_at(5.0, 95.0, 10, 10), Some((0, 0)));
        assert_eq!(gt.pixel_at(99.0, 1.0, 10, 10), Some((9, 9)));
        assert_eq!(gt.pixel_at(-1.0, 95.0, 10, 10), None);
        assert_eq!(gt.pixel_at(5.0, 101.0, 10, 10), None);
        assert_eq!(gt.pixel_at(100.0, 50.0, 10, 10), None);
        assert_eq!(gt.pixel_centre(0, 0), (5.0, 95.0));
    }

    #[test]
    fn reproject_same_crs_is_clone() {
        let grid = array![[1.0]];
        let r = Raster::from_grid(grid.view(), &[0.0], &[0.0], Crs::Wgs84);
        let out = r.reproject(Crs::Wgs84);
        assert_eq!(out.data(), r.data());
        assert_eq!(out.transform(), r.transform());
    }

    #[test]
    fn reproject_albers_to_wgs84() {
        // 4 km cells around the projection origin (-96, 23).
        let x: Vec<f64> = (0..20).map(|i| -38_000.0 + 4000.0 * i as f64).collect();
        let y: Vec<f64> = (0..20).map(|j| 38_000.0 - 4000.0 * j as f64).collect();
        let grid = Array2::from_elem((20, 20), 7.0);
        let r = Raster::from_grid(grid.view(), &x, &y, Crs::ConusAlbers);

        let out = r.reproject(Crs::Wgs84);
        assert_eq!(out.shape(), (20, 20));
        assert_eq!(out.crs(), Crs::Wgs84);

        let gt = out.transform();
        let west = gt.origin_x;
        let east = gt.origin_x + 20.0 * gt.pixel_width;
        let north = gt.origin_y;
        let south = gt.origin_y + 20.0 * gt.pixel_height;
        assert!(west < -96.0 && east > -96.0);
        assert!(south < 23.0 && north > 23.0);
        assert_abs_diff_eq!((west + east) / 2.0, -96.0, epsilon = 0.01);

        // The centre of the output lies inside the source.
        assert_eq!(out.data()[[10, 10]], 7.0);
    }

    #[test]
    fn reproject_outside_source_is_nan() {
        let gt = GeoTransform::new(-96.5, 23.5, 0.1, -0.1);
        let src = Raster::new(Array2::from_elem((10, 10), 1.0), gt, Crs::Wgs84);
        let albers = src.reproject(Crs::ConusAlbers);
        assert!(albers.data().iter().all(|v| v.is_nan() || *v == 1.0));
        assert_eq!(albers.data()[[5, 5]], 1.0);
    }
}
