//! Day/night segmentation
use log::debug;

use crate::{geodesy::GeoPoint, prelude::Epoch, track::GroundTrackSample};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Segment] is a non empty run of consecutive [GroundTrackSample]s
/// sharing the same illumination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// True when the satellite is lit by the sun along this run
    sunlit: bool,
    /// Samples, in chronological order
    samples: Vec<GroundTrackSample>,
}

impl Segment {
    fn new(first: GroundTrackSample) -> Self {
        Self {
            sunlit: first.sunlit,
            samples: vec![first],
        }
    }

    /// True if this is a sunlit (day) [Segment], false when eclipsed.
    pub fn sunlit(&self) -> bool {
        self.sunlit
    }

    /// Samples of this [Segment].
    pub fn samples(&self) -> &[GroundTrackSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// False for any [Segment] produced by [segment].
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// [Epoch] of the first sample
    pub fn start(&self) -> Option<Epoch> {
        self.samples.first().map(|sample| sample.position.epoch)
    }

    /// [Epoch] of the last sample
    pub fn end(&self) -> Option<Epoch> {
        self.samples.last().map(|sample| sample.position.epoch)
    }

    /// Polyline drawn by this [Segment] on the ground.
    pub fn polyline(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.samples.iter().map(|sample| sample.position.geo_point())
    }
}

/// Accumulates the current run while walking the track.
#[derive(Debug, Default, Clone)]
struct SegmentAccumulator {
    /// Run being accumulated
    current: Option<Segment>,
    /// Closed runs
    segments: Vec<Segment>,
}

impl SegmentAccumulator {
    fn new_sample(&mut self, sample: GroundTrackSample) {
        if let Some(run) = self.current.as_mut() {
            if run.sunlit == sample.sunlit {
                run.samples.push(sample);
                return;
            }
        }

        // transition: this sample opens the next run
        if let Some(run) = self.current.replace(Segment::new(sample)) {
            debug!(
                "{} - {} segment closed ({} samples)",
                sample.position.epoch,
                if run.sunlit { "sunlit" } else { "eclipsed" },
                run.len()
            );
            self.segments.push(run);
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        if let Some(run) = self.current.take() {
            self.segments.push(run);
        }
        self.segments
    }
}

/// Splits a chronological series of [GroundTrackSample]s into alternating
/// sunlit and eclipsed [Segment]s, in a single forward pass.
/// Concatenating the resulting [Segment]s gives back the input series.
pub fn segment(samples: &[GroundTrackSample]) -> Vec<Segment> {
    let mut accumulator = SegmentAccumulator::default();
    for sample in samples {
        accumulator.new_sample(*sample);
    }
    accumulator.finish()
}
