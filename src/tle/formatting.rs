use crate::prelude::OrbitalElementSet;

use std::io::{BufWriter, Write};

/// Column of the checksum digit, in element lines.
const CHECKSUM_COLUMN: usize = 68;

/// Computes the modulo 10 checksum of a TLE element line:
/// sum of all digits, each '-' counting as 1, over the first 68 columns.
/// Returns None if the line is too short.
/// ```
/// use groundtrack::tle::line_checksum;
///
/// let line = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
/// assert_eq!(line_checksum(line), Some(7));
/// ```
pub fn line_checksum(line: &str) -> Option<u8> {
    let content = line.as_bytes().get(..CHECKSUM_COLUMN)?;
    let sum = content.iter().fold(0u32, |acc, &byte| match byte {
        b'0'..=b'9' => acc + (byte - b'0') as u32,
        b'-' => acc + 1,
        _ => acc,
    });
    Some((sum % 10) as u8)
}

/// True if the checksum digit of this line matches its content.
pub(crate) fn checksum_matches(line: &str) -> bool {
    let expected = match line.as_bytes().get(CHECKSUM_COLUMN) {
        Some(byte) if byte.is_ascii_digit() => byte - b'0',
        _ => return false,
    };
    line_checksum(line) == Some(expected)
}

/// Returns this element line with its checksum digit recomputed.
/// Lines too short to carry a checksum are returned unchanged.
#[cfg(any(test, feature = "sgp4"))]
pub(crate) fn restore_checksum(line: &str) -> String {
    match (
        line.get(..CHECKSUM_COLUMN),
        line_checksum(line),
        line.get(CHECKSUM_COLUMN + 1..),
    ) {
        (Some(content), Some(checksum), Some(trailer)) => {
            format!("{}{}{}", content, checksum, trailer)
        },
        _ => line.to_string(),
    }
}

impl std::fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl OrbitalElementSet {
    /// Formats this [OrbitalElementSet] into any [Write]able output,
    /// exactly as it was parsed.
    pub fn format<W: Write>(&self, writer: &mut BufWriter<W>) -> std::io::Result<()> {
        write!(writer, "{}", self)?;
        if !self.text().ends_with('\n') {
            writeln!(writer)?;
        }
        Ok(())
    }
}
