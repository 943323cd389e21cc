//! Low order solar ephemeris (NOAA solar calculations)
use crate::{
    geodesy::{GeoPoint, DAYS_PER_JULIAN_CENTURY, J2000_JD},
    prelude::Epoch,
};

/// Julian Day of the Unix epoch (1970-01-01T00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Milliseconds per day
const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// Minutes per day
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Returns the Julian Day (with fractional part) of this [Epoch].
/// ```
/// use groundtrack::prelude::Epoch;
/// use groundtrack::solar::julian_day;
///
/// let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
/// assert!((julian_day(j2000) - 2_451_545.0).abs() < 1.0E-9);
/// ```
pub fn julian_day(t: Epoch) -> f64 {
    t.to_unix_milliseconds() / MILLISECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Returns the sub-solar point at t: the point of the Earth
/// where the sun stands at the zenith. Accurate to a fraction of a degree,
/// which is plenty for day/night classification.
pub fn sub_solar_point(t: Epoch) -> GeoPoint {
    let jc = (julian_day(t) - J2000_JD) / DAYS_PER_JULIAN_CENTURY;

    let mean_longitude = (280.466_46 + jc * (36_000.769_83 + jc * 0.000_303_2)).rem_euclid(360.0);
    let mean_anomaly = 357.529_11 + jc * (35_999.050_29 - 0.000_153_7 * jc);
    let (l0, m) = (mean_longitude.to_radians(), mean_anomaly.to_radians());

    let equation_of_center = m.sin() * (1.914_602 - jc * (0.004_817 + 0.000_014 * jc))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * jc)
        + (3.0 * m).sin() * 0.000_289;

    let true_longitude = mean_longitude + equation_of_center;

    // nutation and aberration
    let omega = (125.04 - 1_934.136 * jc).to_radians();
    let apparent_longitude = true_longitude - 0.005_69 - 0.004_78 * omega.sin();

    let mean_obliquity =
        23.0 + (26.0 + (21.448 - jc * (46.815 + jc * (0.000_59 - jc * 0.001_813))) / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.002_56 * omega.cos()).to_radians();

    let declination = (obliquity.sin() * apparent_longitude.to_radians().sin()).asin();

    let eccentricity = 0.016_708_634 - jc * (0.000_042_037 + 0.000_000_126_7 * jc);
    let y = (obliquity / 2.0).tan().powi(2);

    // in minutes of time
    let equation_of_time = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin())
        .to_degrees();

    let true_solar_time = (minutes_past_midnight(t) + equation_of_time).rem_euclid(MINUTES_PER_DAY);

    GeoPoint {
        latitude: declination.to_degrees(),
        longitude: 180.0 - true_solar_time / 4.0,
    }
}

/// UTC time of day, in minutes
fn minutes_past_midnight(t: Epoch) -> f64 {
    let (_, _, _, h, m, s, ns) = t.to_gregorian_utc();
    h as f64 * 60.0 + m as f64 + (s as f64 + ns as f64 * 1.0E-9) / 60.0
}
