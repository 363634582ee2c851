//! Error type for the simulation boundary

use std::fmt;

/// Everything a caller of the simulation can get back as an error
#[derive(Debug)]
pub enum SimError {
    /// Operation called in the wrong lifecycle phase (double init, use before init)
    PreconditionViolation(&'static str),
    /// Ball or pocket index outside the fixed table layout
    OutOfRange { index: usize, len: usize },
    /// Operation has no effect on the ball in its current state (e.g. pocketed)
    InvalidState(&'static str),
    /// Configuration values break a table invariant
    InvalidConfig(String),
    /// Configuration JSON could not be parsed
    Parse(serde_json::Error),
    /// Configuration file could not be read
    Io(std::io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::PreconditionViolation(what) => write!(f, "precondition violated: {what}"),
            SimError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range (expected < {len})")
            }
            SimError::InvalidState(what) => write!(f, "invalid state: {what}"),
            SimError::InvalidConfig(what) => write!(f, "invalid config: {what}"),
            SimError::Parse(err) => write!(f, "config parse error: {err}"),
            SimError::Io(err) => write!(f, "config read error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Parse(err) => Some(err),
            SimError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Parse(err)
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Check `index < len`, reporting `OutOfRange` otherwise
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SimError::OutOfRange { index, len })
    }
}
