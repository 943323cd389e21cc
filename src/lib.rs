#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod errors;
pub mod geodesy;
pub mod propagator;
pub mod solar;
pub mod tle;
pub mod track;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        errors::{FormatError, PropagatorError, TrackError},
        geodesy::{great_circle_distance, horizon_distance, mean_sidereal_time, GeoPoint},
        propagator::{Propagator, SubSatellitePosition},
        solar::{julian_day, sub_solar_point},
        tle::{Classification, InternationalDesignator, OrbitalElementSet},
        track::{compute_track, GroundTrack, GroundTrackSample, Segment, TrackResult},
    };

    #[cfg(feature = "sgp4")]
    pub use crate::propagator::Sgp4Propagator;

    // pub re-export
    pub use hifitime::prelude::{Duration, Epoch, TimeScale, Unit};
}
