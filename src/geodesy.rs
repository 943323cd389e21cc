//! Spherical Earth geometry
use crate::{prelude::Epoch, solar::julian_day};

use std::f64::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius (in meters)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Great circle distance (in meters) between the sub-solar point and the
/// terminator: half of the half circumference of the mean sphere, truncated
/// to the meter.
pub const TERMINATOR_DISTANCE_M: f64 = 10_007_543.0;

/// Earth diameter used by the simplified horizon distance (in meters)
const HORIZON_DIAMETER_M: f64 = 12_756_000.0;

/// Julian Day of J2000.0
pub(crate) const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century
pub(crate) const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Geographic coordinates (in degrees)
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Latitude, -90..90 (degrees)
    pub latitude: f64,
    /// Longitude, -180..180 (degrees)
    pub longitude: f64,
}

impl GeoPoint {
    /// Builds a new [GeoPoint] from coordinates in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great circle distance (in meters) between two [GeoPoint]s,
/// on a sphere of [EARTH_MEAN_RADIUS_M] (haversine formula).
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat_a, lat_b) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat_b - lat_a;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Distance (in meters) from a point at given altitude (in meters)
/// to its geometric horizon, using the simplified `sqrt(D * h)` form.
/// Negative altitudes have no horizon beyond the point itself.
/// ```
/// use groundtrack::geodesy::horizon_distance;
///
/// let d = horizon_distance(400_000.0);
/// assert!((d - 2_258_849.26).abs() < 1.0);
/// assert_eq!(horizon_distance(-10.0), 0.0);
/// ```
pub fn horizon_distance(altitude_m: f64) -> f64 {
    (HORIZON_DIAMETER_M * altitude_m.max(0.0)).sqrt()
}

/// Greenwich Mean Sidereal Time (in radians, within [0, 2π)) at t,
/// from the IAU 1982 polynomial.
pub fn mean_sidereal_time(t: Epoch) -> f64 {
    let centuries = (julian_day(t) - J2000_JD) / DAYS_PER_JULIAN_CENTURY;

    // in seconds of time
    let gmst_s = 67_310.548_41
        + (876_600.0 * 3_600.0 + 8_640_184.812_866) * centuries
        + 0.093_104 * centuries.powi(2)
        - 6.2E-6 * centuries.powi(3);

    // 240 seconds of time per degree
    (gmst_s * PI / 180.0 / 240.0).rem_euclid(TAU)
}
