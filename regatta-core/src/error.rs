//! Error types for Regatta core.

use std::{error::Error, fmt};

/// Category of a [`RegattaError`], without its message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required value was absent.
    MissingValue,
    /// A value was present but outside its allowed domain.
    InvalidArgument,
    /// The vessel must be in port but is sailing.
    AlreadyUnderWay,
    /// The vessel must be sailing but is in port.
    NotUnderWay,
    /// The requested change would leave the vessel unchanged.
    NoOp,
    /// Two vessels cannot race each other.
    IncompatibleRace,
    /// A drill script could not be parsed.
    Script,
}

/// Error type for Regatta core operations.
#[derive(Debug)]
pub enum RegattaError {
    /// A required value was absent.
    MissingValue(String),
    /// A value was present but outside its allowed domain.
    InvalidArgument(String),
    /// The named vessel is already under way.
    AlreadyUnderWay(String),
    /// The named vessel is in port.
    NotUnderWay(String),
    /// A heading change requested the current heading.
    NoOp(String),
    /// The two vessels differ in heading or mast count.
    IncompatibleRace(String),
    /// A drill script was not valid JSON for the order schema.
    Script(serde_json::Error),
}

impl RegattaError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingValue(_) => ErrorKind::MissingValue,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::AlreadyUnderWay(_) => ErrorKind::AlreadyUnderWay,
            Self::NotUnderWay(_) => ErrorKind::NotUnderWay,
            Self::NoOp(_) => ErrorKind::NoOp,
            Self::IncompatibleRace(_) => ErrorKind::IncompatibleRace,
            Self::Script(_) => ErrorKind::Script,
        }
    }

    pub(crate) fn missing(what: &str) -> Self {
        Self::MissingValue(format!("{what} is required"))
    }

    pub(crate) fn empty(what: &str) -> Self {
        Self::InvalidArgument(format!("{what} cannot be empty"))
    }
}

impl fmt::Display for RegattaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(message) => write!(f, "missing value: {message}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::AlreadyUnderWay(vessel) => {
                write!(f, "vessel {vessel} is already under way")
            }
            Self::NotUnderWay(vessel) => write!(f, "vessel {vessel} is not under way"),
            Self::NoOp(message) => write!(f, "no change: {message}"),
            Self::IncompatibleRace(message) => write!(f, "incompatible race: {message}"),
            Self::Script(err) => write!(f, "drill script error: {err}"),
        }
    }
}

impl Error for RegattaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Script(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RegattaError {
    fn from(value: serde_json::Error) -> Self {
        Self::Script(value)
    }
}

/// Convenience result type for Regatta core.
pub type Result<T> = std::result::Result<T, RegattaError>;
