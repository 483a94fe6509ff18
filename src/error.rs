use thiserror::Error;

/// Failures of the static inputs handed to this crate.
///
/// None of these are transient: the caller has to come back with a
/// different element set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A TLE line failed structural validation or one of its fields
    /// could not be parsed or is out of range.
    #[error("malformed element set (line {line}): {reason}")]
    MalformedElementSet { line: u8, reason: String },

    /// The epoch field of line 1 is not a usable `YYDDD.DDDDDDDD` value.
    #[error("invalid epoch: {0}")]
    InvalidEpoch(String),
}

impl Error {
    pub(crate) fn malformed(line: u8, reason: impl Into<String>) -> Self {
        Error::MalformedElementSet {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
