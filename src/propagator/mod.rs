//! Orbit propagation capability
#[cfg(feature = "sgp4")]
#[cfg_attr(docsrs, doc(cfg(feature = "sgp4")))]
mod sgp4;

#[cfg(feature = "sgp4")]
pub use self::sgp4::Sgp4Propagator;

use crate::{
    errors::PropagatorError,
    geodesy::GeoPoint,
    prelude::{Epoch, OrbitalElementSet},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [SubSatellitePosition]: point of the Earth directly beneath
/// the satellite, at a given instant.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubSatellitePosition {
    /// [Epoch] of this position
    pub epoch: Epoch,
    /// Latitude, -90..90 (degrees)
    pub latitude: f64,
    /// Longitude, -180..180 (degrees)
    pub longitude: f64,
    /// Altitude above the Earth surface (meters)
    pub altitude: f64,
}

impl SubSatellitePosition {
    /// Returns the geographic coordinates of this position.
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A [Propagator] turns an [OrbitalElementSet] into satellite positions.
/// The ground track engine only relies on this capability, so
/// any SGP4/SDP4 class implementation may be plugged in.
pub trait Propagator {
    /// Orbital period (in minutes) of the satellite described by these elements.
    fn orbital_period(&self, elements: &OrbitalElementSet) -> Result<f64, PropagatorError>;

    /// [SubSatellitePosition] of this satellite at t.
    fn position(
        &self,
        elements: &OrbitalElementSet,
        t: Epoch,
    ) -> Result<SubSatellitePosition, PropagatorError>;
}
