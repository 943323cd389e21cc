use crate::{
    errors::FormatError,
    prelude::{Classification, InternationalDesignator, OrbitalElementSet},
    tle::{formatting::checksum_matches, full_epoch_year},
};

use itertools::Itertools;
use log::warn;

use std::{
    ops::{Range, RangeBounds},
    str::FromStr,
};

/// Maximal name length (line 0)
const NAME_WIDTH: usize = 24;

fn field<'a>(line: &'a str, columns: Range<usize>, name: &'static str) -> Result<&'a str, FormatError> {
    line.get(columns).ok_or(FormatError::MissingField(name))
}

fn parse_field<T: FromStr>(
    line: &str,
    columns: Range<usize>,
    name: &'static str,
) -> Result<T, FormatError> {
    field(line, columns, name)?
        .trim()
        .parse::<T>()
        .or(Err(FormatError::InvalidField(name)))
}

/// Parses a fixed-column decimal field. Non-finite values
/// ("nan", "inf") are not valid TLE content.
fn parse_float(line: &str, columns: Range<usize>, name: &'static str) -> Result<f64, FormatError> {
    let value = parse_field::<f64>(line, columns, name)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::InvalidField(name))
    }
}

/// Decodes an assumed decimal point exponential field: `[sign]mmmmm[sign]e`,
/// that is `±0.mmmmm × 10^(±e)`.
fn parse_exponential(content: &str, name: &'static str) -> Result<f64, FormatError> {
    let content = content.trim();

    let (sign, content) = if let Some(stripped) = content.strip_prefix('-') {
        (-1.0, stripped)
    } else {
        (1.0, content.strip_prefix('+').unwrap_or(content))
    };

    // exponent is always the last digit, possibly preceded by its sign
    let (mantissa, exponent) = match content.rfind(|c: char| c == '+' || c == '-') {
        Some(offset) => (&content[..offset], &content[offset..]),
        None => {
            let offset = content
                .len()
                .checked_sub(1)
                .ok_or(FormatError::InvalidField(name))?;
            (&content[..offset], &content[offset..])
        },
    };

    let mantissa = mantissa.trim();
    if mantissa.is_empty() || !mantissa.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidField(name));
    }

    let mantissa = f64::from_str(&format!("0.{}", mantissa)).or(Err(FormatError::InvalidField(name)))?;
    let exponent = i32::from_str(exponent).or(Err(FormatError::InvalidField(name)))?;

    Ok(sign * mantissa * 10.0_f64.powi(exponent))
}

/// Decodes the eccentricity field, which has an implicit leading decimal point.
fn parse_eccentricity(content: &str) -> Result<f64, FormatError> {
    let digits = content.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidField("eccentricity"));
    }
    f64::from_str(&format!("0.{}", digits)).or(Err(FormatError::InvalidField("eccentricity")))
}

fn check_range<R: RangeBounds<f64>>(value: f64, range: R, name: &'static str) -> Result<(), FormatError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(FormatError::OutOfRange(name))
    }
}

impl OrbitalElementSet {
    /// Parse one [OrbitalElementSet] from a three line record:
    /// name, then line 1 and line 2 of the element set.
    /// A trailing line terminator is tolerated.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let lines = text.lines().collect::<Vec<_>>();

        if lines.len() != 3 || lines.iter().any(|line| line.trim().is_empty()) {
            let non_empty = lines.iter().filter(|line| !line.trim().is_empty()).count();
            return Err(FormatError::LineCount(non_empty));
        }

        let (line0, line1, line2) = (lines[0], lines[1], lines[2]);

        let name = line0.chars().take(NAME_WIDTH).collect::<String>().trim().to_string();

        // line 1
        if !line1.starts_with('1') {
            return Err(FormatError::LineMarker {
                line: 1,
                expected: '1',
            });
        }

        let satellite_number = parse_field::<u32>(line1, 2..7, "satellite number")?;

        let classification = field(line1, 7..8, "classification")?;
        let classification = Classification::from_str(classification)
            .or(Err(FormatError::Classification(classification.to_string())))?;

        let designator = InternationalDesignator {
            launch_year: field(line1, 9..11, "launch year")?.to_string(),
            launch_number: field(line1, 11..14, "launch number")?.to_string(),
            piece: field(line1, 14..17, "launch piece")?.trim().to_string(),
        };

        let epoch_year = full_epoch_year(parse_field::<u16>(line1, 18..20, "epoch year")?);
        let epoch_day = parse_float(line1, 20..32, "epoch day")?;

        let mean_motion_dot = parse_float(line1, 33..43, "mean motion first derivative")?;

        let mean_motion_ddot = parse_exponential(
            field(line1, 44..52, "mean motion second derivative")?,
            "mean motion second derivative",
        )?;

        let bstar = parse_exponential(field(line1, 53..61, "bstar")?, "bstar")?;

        let ephemeris_type = parse_field::<u8>(line1, 62..63, "ephemeris type")?;
        let element_set_number = parse_field::<u16>(line1, 64..68, "element set number")?;

        // line 2
        if !line2.starts_with('2') {
            return Err(FormatError::LineMarker {
                line: 2,
                expected: '2',
            });
        }

        let inclination_deg = parse_float(line2, 8..16, "inclination")?;
        let raan_deg = parse_float(line2, 17..25, "right ascension")?;
        let eccentricity = parse_eccentricity(field(line2, 26..33, "eccentricity")?)?;
        let argument_of_perigee_deg = parse_float(line2, 34..42, "argument of perigee")?;
        let mean_anomaly_deg = parse_float(line2, 43..51, "mean anomaly")?;
        let mean_motion = parse_float(line2, 52..63, "mean motion")?;
        let revolution_number = parse_field::<u32>(line2, 63..68, "revolution number")?;

        check_range(epoch_day, 1.0..367.0, "epoch day")?;
        check_range(inclination_deg, 0.0..=180.0, "inclination")?;
        check_range(raan_deg, 0.0..=360.0, "right ascension")?;
        check_range(eccentricity, 0.0..1.0, "eccentricity")?;
        check_range(argument_of_perigee_deg, 0.0..=360.0, "argument of perigee")?;
        check_range(mean_anomaly_deg, 0.0..=360.0, "mean anomaly")?;

        if mean_motion.is_nan() || mean_motion <= 0.0 {
            return Err(FormatError::OutOfRange("mean motion"));
        }

        for (index, line) in [(1, line1), (2, line2)] {
            if !checksum_matches(line) {
                warn!("{}({}) - line {} checksum mismatch", name, satellite_number, index);
            }
        }

        Ok(Self {
            name,
            satellite_number,
            classification,
            designator,
            epoch_year,
            epoch_day,
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            ephemeris_type,
            element_set_number,
            inclination_deg,
            raan_deg,
            eccentricity,
            argument_of_perigee_deg,
            mean_anomaly_deg,
            mean_motion,
            revolution_number,
            text: text.to_string(),
        })
    }

    /// Parse all [OrbitalElementSet]s contained in this text.
    /// Blank lines are discarded, remaining lines are grouped by 3.
    /// Blank input returns no records.
    pub fn parse_many(text: &str) -> Result<Vec<Self>, FormatError> {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>();

        if lines.len() % 3 != 0 {
            return Err(FormatError::RecordLineCount(lines.len()));
        }

        lines
            .into_iter()
            .tuples::<(&str, &str, &str)>()
            .map(|(name, line1, line2)| Self::parse(&format!("{}\n{}\n{}", name, line1, line2)))
            .collect()
    }
}
