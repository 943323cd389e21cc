//! SGP4 backed [Propagator]
use ::sgp4::{Constants, Elements, MinutesSinceEpoch};
use log::{debug, trace};

use std::cell::RefCell;

use crate::{
    errors::PropagatorError,
    geodesy::mean_sidereal_time,
    prelude::{Epoch, OrbitalElementSet},
    propagator::{Propagator, SubSatellitePosition},
    tle::restore_checksum,
};

/// WGS84 semi major axis (in kilometers)
const WGS84_A_KM: f64 = 6_378.137;

/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Latitude refinement iterations
const GEODETIC_ITERATIONS: usize = 10;

/// [Sgp4Propagator] runs the SGP4/SDP4 models of the `sgp4` crate
/// on the element lines retained by the [OrbitalElementSet].
/// Model constants are initialized once per element set and reused
/// for all following positions of that same element set.
#[derive(Debug, Default, Clone)]
pub struct Sgp4Propagator {
    /// Element set text and its model constants
    cache: RefCell<Option<(String, Constants)>>,
}

impl Sgp4Propagator {
    /// Builds a new [Sgp4Propagator].
    pub fn new() -> Self {
        Self::default()
    }

    fn constants(elements: &OrbitalElementSet) -> Result<Constants, PropagatorError> {
        let (line1, line2) = elements
            .element_lines()
            .ok_or_else(|| PropagatorError::new("missing element lines"))?;

        // stale checksums are tolerated at parsing time
        let (line1, line2) = (restore_checksum(line1), restore_checksum(line2));

        let sgp4_elements = Elements::from_tle(
            Some(elements.name.clone()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| PropagatorError::new(format!("{:?}", e)))?;

        debug!(
            "{}({}) - sgp4 initialization",
            elements.name, elements.satellite_number
        );

        Constants::from_elements(&sgp4_elements).map_err(|e| PropagatorError::new(format!("{:?}", e)))
    }

    /// Runs the model at t, initializing it first
    /// when these elements differ from the previous ones.
    fn propagate(&self, elements: &OrbitalElementSet, t: Epoch) -> Result<[f64; 3], PropagatorError> {
        let mut cache = self.cache.borrow_mut();

        let entry = match cache.take() {
            Some((text, constants)) if text == elements.text() => (text, constants),
            _ => (elements.text().to_string(), Self::constants(elements)?),
        };

        let (_, constants) = cache.insert(entry);

        let prediction = constants
            .propagate(MinutesSinceEpoch(elements.minutes_since_epoch(t)))
            .map_err(|e| PropagatorError::new(format!("{:?}", e)))?;

        Ok(prediction.position)
    }
}

/// Converts Earth fixed cartesian coordinates (in kilometers)
/// to geodetic latitude, longitude (degrees) and altitude (meters).
fn geodetic(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let r = x.hypot(y);

    let longitude = y.atan2(x);

    let mut latitude = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..GEODETIC_ITERATIONS {
        c = 1.0 / (1.0 - e2 * latitude.sin().powi(2)).sqrt();
        latitude = (z + WGS84_A_KM * c * e2 * latitude.sin()).atan2(r);
    }

    let altitude_km = if latitude.cos().abs() > 1.0E-9 {
        r / latitude.cos() - WGS84_A_KM * c
    } else {
        z.abs() - WGS84_A_KM * (1.0 - e2).sqrt()
    };

    (
        latitude.to_degrees(),
        longitude.to_degrees(),
        altitude_km * 1000.0,
    )
}

impl Propagator for Sgp4Propagator {
    fn orbital_period(&self, elements: &OrbitalElementSet) -> Result<f64, PropagatorError> {
        Ok(elements.mean_motion_period())
    }

    fn position(
        &self,
        elements: &OrbitalElementSet,
        t: Epoch,
    ) -> Result<SubSatellitePosition, PropagatorError> {
        // TEME to Earth fixed
        let [x, y, z] = self.propagate(elements, t)?;
        let gmst = mean_sidereal_time(t);
        let (sin, cos) = gmst.sin_cos();

        let x_ecef = cos * x + sin * y;
        let y_ecef = -sin * x + cos * y;

        let (latitude, longitude, altitude) = geodetic(x_ecef, y_ecef, z);

        trace!(
            "{}({}) - {} lat={:.3} lon={:.3} alt={:.0}m",
            elements.name,
            elements.satellite_number,
            t,
            latitude,
            longitude,
            altitude
        );

        Ok(SubSatellitePosition {
            epoch: t,
            latitude,
            longitude,
            altitude,
        })
    }
}
