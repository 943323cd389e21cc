//! Two-Line Element sets
mod formatting;
mod parsing;

pub use formatting::line_checksum;

#[cfg(feature = "sgp4")]
pub(crate) use formatting::restore_checksum;

use crate::prelude::{Epoch, Unit};

use strum_macros::{Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes in one day
pub(crate) const MINUTES_PER_DAY: f64 = 1440.0;

/// Two-digit epoch years below this value belong to the 2000s.
pub(crate) const EPOCH_YEAR_PIVOT: u16 = 57;

/// Security classification of the element set
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, EnumString, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Classification {
    /// U: public data
    #[default]
    #[strum(serialize = "U")]
    Unclassified,
    /// C
    #[strum(serialize = "C")]
    Classified,
    /// S
    #[strum(serialize = "S")]
    Secret,
}

/// COSPAR International Designator, as found in line 1.
/// Each component is kept as written (left padded with zeros),
/// only the piece is trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InternationalDesignator {
    /// Last two digits of the launch year
    pub launch_year: String,
    /// Launch number of the year
    pub launch_number: String,
    /// Piece of the launch
    pub piece: String,
}

impl std::fmt::Display for InternationalDesignator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}{}", self.launch_year, self.launch_number, self.piece)
    }
}

/// [OrbitalElementSet] parsed from a three line TLE record.
/// The original text is retained verbatim and is what
/// [std::fmt::Display] produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElementSet {
    /// Satellite name (line 0)
    pub name: String,
    /// Satellite catalog number
    pub satellite_number: u32,
    /// [Classification]
    pub classification: Classification,
    /// [InternationalDesignator]
    pub designator: InternationalDesignator,
    /// Full epoch year (4 digits)
    pub epoch_year: i32,
    /// Epoch day of year, with fractional part of the day
    pub epoch_day: f64,
    /// First time derivative of the mean motion, divided by two (rev/day²)
    pub mean_motion_dot: f64,
    /// Second time derivative of the mean motion, divided by six (rev/day³)
    pub mean_motion_ddot: f64,
    /// BSTAR drag term (1/earth radii)
    pub bstar: f64,
    /// Ephemeris type (always 0 in distributed data)
    pub ephemeris_type: u8,
    /// Element set number
    pub element_set_number: u16,
    /// Inclination (degrees)
    pub inclination_deg: f64,
    /// Right ascension of the ascending node (degrees)
    pub raan_deg: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Argument of perigee (degrees)
    pub argument_of_perigee_deg: f64,
    /// Mean anomaly (degrees)
    pub mean_anomaly_deg: f64,
    /// Mean motion (revolutions per day)
    pub mean_motion: f64,
    /// Revolution number at epoch
    pub revolution_number: u32,
    /// Original text
    text: String,
}

impl OrbitalElementSet {
    /// Returns the original TLE text, as parsed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns line 1 and line 2 of the original record.
    pub fn element_lines(&self) -> Option<(&str, &str)> {
        let mut lines = self.text.lines().skip(1);
        Some((lines.next()?, lines.next()?))
    }

    /// Returns the [Epoch] at which these elements are valid, in UTC.
    /// ```
    /// use groundtrack::prelude::{Epoch, OrbitalElementSet};
    ///
    /// let tle = OrbitalElementSet::parse(
    /// "ISS (ZARYA)
    /// 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
    /// 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537").unwrap();
    ///
    /// let midnight = Epoch::from_gregorian_utc_at_midnight(2008, 9, 20);
    /// assert!((tle.epoch() - midnight).to_seconds() > 44_000.0);
    /// ```
    pub fn epoch(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.epoch_year, 1, 1)
            + (self.epoch_day - 1.0) * Unit::Day
    }

    /// Returns the elapsed time between the epoch of these elements
    /// and t, in minutes. Negative when t precedes the epoch.
    pub fn minutes_since_epoch(&self, t: Epoch) -> f64 {
        (t - self.epoch()).to_unit(Unit::Minute)
    }

    /// Returns the orbital period (in minutes) deduced from the mean motion.
    pub fn mean_motion_period(&self) -> f64 {
        MINUTES_PER_DAY / self.mean_motion
    }

    /// True when both element lines carry a valid checksum digit.
    pub fn line_checksums_valid(&self) -> bool {
        match self.element_lines() {
            Some((line1, line2)) => {
                formatting::checksum_matches(line1) && formatting::checksum_matches(line2)
            },
            None => false,
        }
    }
}

impl std::str::FromStr for OrbitalElementSet {
    type Err = crate::errors::FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Converts a two-digit epoch year into a full year.
pub(crate) fn full_epoch_year(two_digits: u16) -> i32 {
    if two_digits < EPOCH_YEAR_PIVOT {
        2000 + two_digits as i32
    } else {
        1900 + two_digits as i32
    }
}
