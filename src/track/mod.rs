//! Ground track sampling and sunlit/eclipsed segmentation
mod segments;

pub use segments::{segment, Segment};

use log::debug;

use crate::{
    errors::{PropagatorError, TrackError},
    geodesy::{great_circle_distance, horizon_distance, GeoPoint, TERMINATOR_DISTANCE_M},
    prelude::{Epoch, OrbitalElementSet, Propagator, SubSatellitePosition, Unit},
    solar::sub_solar_point,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One full revolution is sampled in this many equal steps.
pub const STEPS_PER_REVOLUTION: u32 = 180;

/// Maximal number of samples of a single track (5 555 revolutions).
pub const MAX_SAMPLES: usize = 1_000_000;

/// [GroundTrackSample]: sub-satellite position and its illumination.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundTrackSample {
    /// [SubSatellitePosition]
    pub position: SubSatellitePosition,
    /// True when the satellite is lit by the sun
    pub sunlit: bool,
}

/// [TrackResult] of one ground track computation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackResult {
    /// All samples, in chronological order
    pub samples: Vec<GroundTrackSample>,
    /// Alternating sunlit and eclipsed [Segment]s covering all samples
    pub segments: Vec<Segment>,
}

impl TrackResult {
    /// True if no track was requested.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Complete polyline of this track.
    pub fn polyline(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.samples.iter().map(|sample| sample.position.geo_point())
    }

    /// Sunlit (day) [Segment]s.
    pub fn sunlit_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|segment| segment.sunlit())
    }

    /// Eclipsed (night) [Segment]s.
    pub fn eclipsed_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|segment| !segment.sunlit())
    }
}

/// True when a satellite at this position sees the sun at the instant
/// the sun stands at the zenith of the `sub_solar` point. The satellite
/// is lit while it remains within the terminator distance of the sub-solar
/// point, extended by its own horizon distance.
pub fn is_sunlit(position: &SubSatellitePosition, sub_solar: GeoPoint) -> bool {
    let distance = great_circle_distance(sub_solar, position.geo_point());
    let threshold = TERMINATOR_DISTANCE_M + horizon_distance(position.altitude);
    distance <= threshold
}

/// [GroundTrack] describes which part of the orbit should be drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundTrack {
    /// Fraction of one revolution to be sampled.
    /// Null or negative fractions request no track at all.
    pub path_length: f64,
    /// Track start [Epoch]. Defaults to now when not defined.
    pub start: Option<Epoch>,
}

impl Default for GroundTrack {
    /// One complete revolution, starting now.
    fn default() -> Self {
        Self {
            path_length: 1.0,
            start: None,
        }
    }
}

impl GroundTrack {
    /// Returns a new [GroundTrack] covering this fraction of one revolution.
    pub fn with_path_length(&self, path_length: f64) -> Self {
        let mut s = self.clone();
        s.path_length = path_length;
        s
    }

    /// Returns a new [GroundTrack] starting at this [Epoch].
    pub fn with_start(&self, start: Epoch) -> Self {
        let mut s = self.clone();
        s.start = Some(start);
        s
    }

    /// Number of samples this [GroundTrack] will produce.
    /// None when `path_length` is not finite, or would produce
    /// more than [MAX_SAMPLES].
    /// ```
    /// use groundtrack::prelude::GroundTrack;
    ///
    /// let track = GroundTrack::default();
    /// assert_eq!(track.nb_samples(), Some(181));
    /// assert_eq!(track.with_path_length(0.5).nb_samples(), Some(91));
    /// assert_eq!(track.with_path_length(0.0).nb_samples(), Some(0));
    /// assert_eq!(track.with_path_length(f64::NAN).nb_samples(), None);
    /// assert_eq!(track.with_path_length(1.0E17).nb_samples(), None);
    /// ```
    pub fn nb_samples(&self) -> Option<usize> {
        if !self.path_length.is_finite() {
            return None;
        }
        if self.path_length <= 0.0 {
            return Some(0);
        }

        let steps = (STEPS_PER_REVOLUTION as f64 * self.path_length).floor();
        if steps >= MAX_SAMPLES as f64 {
            return None;
        }

        (steps as usize).checked_add(1)
    }

    /// Computes the ground track of this satellite, using the provided [Propagator].
    /// Any propagation failure aborts the computation.
    pub fn compute<P: Propagator + ?Sized>(
        &self,
        propagator: &P,
        elements: &OrbitalElementSet,
    ) -> Result<TrackResult, TrackError> {
        let nb_samples = self
            .nb_samples()
            .ok_or(TrackError::PathLength(self.path_length))?;

        if nb_samples == 0 {
            return Ok(TrackResult::default());
        }

        let period_min = propagator.orbital_period(elements)?;
        if !period_min.is_finite() || period_min <= 0.0 {
            return Err(PropagatorError::new(format!("invalid orbital period: {}", period_min)).into());
        }

        let step_min = period_min / STEPS_PER_REVOLUTION as f64;

        let t0 = match self.start {
            Some(t0) => t0,
            None => Epoch::now()?,
        };

        let mut samples = Vec::with_capacity(nb_samples);

        for i in 0..nb_samples {
            let t = t0 + (i as f64 * step_min) * Unit::Minute;
            let position = propagator.position(elements, t)?;
            let sunlit = is_sunlit(&position, sub_solar_point(t));
            samples.push(GroundTrackSample { position, sunlit });
        }

        let segments = segment(&samples);

        debug!(
            "{}({}) - {} track: {} samples, {} segments",
            elements.name,
            elements.satellite_number,
            t0,
            samples.len(),
            segments.len()
        );

        Ok(TrackResult { samples, segments })
    }
}

/// Computes the ground track over `path_length` of one revolution, from `start`
/// (or now), sampling one revolution in [STEPS_PER_REVOLUTION] steps.
/// Null or negative `path_length` returns an empty [TrackResult]
/// without invoking the [Propagator].
pub fn compute_track<P: Propagator + ?Sized>(
    propagator: &P,
    elements: &OrbitalElementSet,
    path_length: f64,
    start: Option<Epoch>,
) -> Result<TrackResult, TrackError> {
    GroundTrack { path_length, start }.compute(propagator, elements)
}
