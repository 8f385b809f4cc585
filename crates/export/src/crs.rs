//! Built-in coordinate reference systems.
//!
//! Only the two systems the SWB summaries move between are supported:
//! geographic WGS 84 (EPSG:4326) and CONUS Albers Equal Area on NAD83
//! (EPSG:5070). The Albers formulas are the ellipsoidal forms from Snyder,
//! *Map Projections: A Working Manual* (USGS PP 1395, 1987), eqs. 14-1
//! to 14-21 and 3-16.

use std::f64::consts::FRAC_PI_2;
use std::sync::LazyLock;

use crate::error::ExportError;

// ---------------------------------------------------------------------------
// GRS 80 ellipsoid
// ---------------------------------------------------------------------------

const A: f64 = 6_378_137.0;
const F: f64 = 1.0 / 298.257_222_101;
const E2: f64 = 2.0 * F - F * F;

// ---------------------------------------------------------------------------
// EPSG:5070 parameters
// ---------------------------------------------------------------------------

const LAT0: f64 = 23.0;
const LON0: f64 = -96.0;
const LAT1: f64 = 29.5;
const LAT2: f64 = 45.5;

static CONUS_ALBERS: LazyLock<AlbersConic> =
    LazyLock::new(|| AlbersConic::new(LAT0, LON0, LAT1, LAT2));

/// A supported coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// Geographic longitude/latitude in degrees (EPSG:4326).
    Wgs84,
    /// NAD83 / Conus Albers, metres (EPSG:5070).
    ConusAlbers,
}

impl Crs {
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedCrs`] for any other code.
    pub fn from_epsg(epsg: u32) -> Result<Self, ExportError> {
        match epsg {
            4326 => Ok(Crs::Wgs84),
            5070 => Ok(Crs::ConusAlbers),
            _ => Err(ExportError::UnsupportedCrs { epsg }),
        }
    }

    pub fn epsg(self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::ConusAlbers => 5070,
        }
    }

    pub fn is_geographic(self) -> bool {
        matches!(self, Crs::Wgs84)
    }

    /// Converts `(x, y)` in this system to `(lon, lat)` degrees.
    pub fn to_lonlat(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Crs::Wgs84 => (x, y),
            Crs::ConusAlbers => CONUS_ALBERS.inverse(x, y),
        }
    }

    /// Converts `(lon, lat)` degrees to `(x, y)` in this system.
    pub fn from_lonlat(self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Crs::Wgs84 => (lon, lat),
            Crs::ConusAlbers => CONUS_ALBERS.forward(lon, lat),
        }
    }
}

/// Transforms a point between two systems.
pub fn transform(from: Crs, to: Crs, x: f64, y: f64) -> (f64, f64) {
    if from == to {
        return (x, y);
    }
    let (lon, lat) = from.to_lonlat(x, y);
    to.from_lonlat(lon, lat)
}

// ---------------------------------------------------------------------------
// Albers Equal Area Conic
// ---------------------------------------------------------------------------

/// Precomputed constants for one Albers Equal Area Conic projection.
#[derive(Debug, Clone)]
struct AlbersConic {
    lon0: f64,
    e: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl AlbersConic {
    /// Angles in degrees; false easting and northing are zero.
    fn new(lat0: f64, lon0: f64, lat1: f64, lat2: f64) -> Self {
        let e = E2.sqrt();
        let (phi0, phi1, phi2) = (lat0.to_radians(), lat1.to_radians(), lat2.to_radians());

        let m1 = m(phi1);
        let m2 = m(phi2);
        let q0 = q(phi0, e);
        let q1 = q(phi1, e);
        let q2 = q(phi2, e);

        let n = (m1 * m1 - m2 * m2) / (q2 - q1);
        let c = m1 * m1 + n * q1;
        let rho0 = A * (c - n * q0).sqrt() / n;

        Self {
            lon0: lon0.to_radians(),
            e,
            n,
            c,
            rho0,
        }
    }

    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let rho = A * (self.c - self.n * q(phi, self.e)).max(0.0).sqrt() / self.n;
        let theta = self.n * wrap_pi(lon.to_radians() - self.lon0);
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let dy = self.rho0 - y;
        let rho = x.hypot(dy);
        let theta = x.atan2(dy);
        let q = (self.c - rho * rho * self.n * self.n / (A * A)) / self.n;

        let lon = self.lon0 + theta / self.n;
        let lat = phi_from_q(q, self.e);
        (lon.to_degrees(), lat.to_degrees())
    }
}

/// Snyder eq. 14-15.
fn m(phi: f64) -> f64 {
    let s = phi.sin();
    phi.cos() / (1.0 - E2 * s * s).sqrt()
}

/// Snyder eq. 3-12.
fn q(phi: f64, e: f64) -> f64 {
    let s = phi.sin();
    let es = e * s;
    (1.0 - E2) * (s / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

/// Iterative inverse of [`q`] (Snyder eq. 3-16).
fn phi_from_q(q_target: f64, e: f64) -> f64 {
    // q at the pole; beyond it the point is off the ellipsoid.
    let q_pole = q(FRAC_PI_2, e);
    if q_target.abs() >= q_pole {
        return FRAC_PI_2.copysign(q_target);
    }

    let mut phi = (q_target / 2.0).asin();
    for _ in 0..25 {
        let s = phi.sin();
        let es = e * s;
        let one_minus = 1.0 - es * es;
        let delta = one_minus * one_minus / (2.0 * phi.cos())
            * (q_target / (1.0 - E2) - s / one_minus
                + (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln());
        phi += delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    phi
}

fn wrap_pi(mut a: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while a > PI {
        a -= TAU;
    }
    while a < -PI {
        a += TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn epsg_lookup() {
        assert_eq!(Crs::from_epsg(4326).unwrap(), Crs::Wgs84);
        assert_eq!(Crs::from_epsg(5070).unwrap(), Crs::ConusAlbers);
        assert_eq!(Crs::ConusAlbers.epsg(), 5070);
        assert!(matches!(
            Crs::from_epsg(3857),
            Err(ExportError::UnsupportedCrs { epsg: 3857 })
        ));
    }

    #[test]
    fn origin_maps_to_zero() {
        let (x, y) = Crs::ConusAlbers.from_lonlat(-96.0, 23.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn central_meridian_is_vertical() {
        let (x, y) = Crs::ConusAlbers.from_lonlat(-96.0, 40.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
        // Roughly 17 degrees of latitude north of the origin.
        assert!(y > 1_800_000.0 && y < 2_000_000.0, "y = {y}");
    }

    #[test]
    fn east_is_positive_x() {
        let (east, _) = Crs::ConusAlbers.from_lonlat(-80.0, 35.0);
        let (west, _) = Crs::ConusAlbers.from_lonlat(-112.0, 35.0);
        assert!(east > 0.0);
        assert_abs_diff_eq!(east, -west, epsilon = 1e-6);
    }

    #[test]
    fn albers_roundtrip() {
        let points = [(-96.0, 23.0), (-75.0, 35.0), (-122.4, 47.6), (-89.4, 43.1), (-68.0, 45.0)];
        for &(lon, lat) in &points {
            let (x, y) = Crs::ConusAlbers.from_lonlat(lon, lat);
            let (lon2, lat2) = Crs::ConusAlbers.to_lonlat(x, y);
            assert_abs_diff_eq!(lon, lon2, epsilon = 1e-9);
            assert_abs_diff_eq!(lat, lat2, epsilon = 1e-9);
        }
    }

    #[test]
    fn transform_same_crs_is_identity() {
        assert_eq!(transform(Crs::ConusAlbers, Crs::ConusAlbers, 1.5, -2.5), (1.5, -2.5));
        let (lon, lat) = transform(Crs::ConusAlbers, Crs::Wgs84, 0.0, 0.0);
        assert_abs_diff_eq!(lon, -96.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lat, 23.0, epsilon = 1e-9);
    }
}
