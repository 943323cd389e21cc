use thiserror::Error;

/// Errors raised while parsing TLE text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// A record is made of exactly 3 non empty lines
    #[error("a TLE record is made of 3 lines, got {0}")]
    LineCount(usize),
    /// Multi record input must contain a multiple of 3 lines
    #[error("number of lines ({0}) is not a multiple of 3")]
    RecordLineCount(usize),
    /// Line does not start with its expected line number
    #[error("line {line} should start with '{expected}'")]
    LineMarker { line: usize, expected: char },
    /// Line too short to contain this field
    #[error("missing {0} field")]
    MissingField(&'static str),
    /// Field content is not a valid number
    #[error("invalid {0} field")]
    InvalidField(&'static str),
    /// Unknown classification character
    #[error("unknown classification \"{0}\"")]
    Classification(String),
    /// Parsed value is not physically valid
    #[error("{0} out of range")]
    OutOfRange(&'static str),
}

/// Opaque failure reported by a [crate::propagator::Propagator].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("propagation failure: {0}")]
pub struct PropagatorError(String);

impl PropagatorError {
    /// Wraps any propagator failure description.
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self(description.into())
    }

    /// Returns the failure description.
    pub fn description(&self) -> &str {
        &self.0
    }
}

/// Ground track computation errors
#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    Propagator(#[from] PropagatorError),
    /// Path length must be a finite fraction of revolution,
    /// producing at most [crate::track::MAX_SAMPLES] samples
    #[error("invalid path length: {0}")]
    PathLength(f64),
    /// Failed to read the system clock, when no start instant was provided
    #[error("system time error: {0}")]
    SystemTime(#[from] hifitime::HifitimeError),
}
