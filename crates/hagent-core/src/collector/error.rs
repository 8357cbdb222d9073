//! Error type shared by all probers.

use crate::collector::procfs::parser::ParseError;
use crate::metrics::RegistryError;

/// Error type for a failed probe cycle.
#[derive(Debug)]
pub enum CollectError {
    /// Source file could not be opened or read.
    Io(std::io::Error),
    /// Source content did not have the expected format.
    Parse(ParseError),
    /// The registry rejected a directory or metric.
    Registry(RegistryError),
    /// A DNS lookup failed or returned no addresses.
    Resolve { host: String, reason: String },
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(e) => write!(f, "{}", e),
            CollectError::Registry(e) => write!(f, "registration error: {}", e),
            CollectError::Resolve { host, reason } => {
                write!(f, "failed to resolve {}: {}", host, reason)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(e) => Some(e),
            CollectError::Registry(e) => Some(e),
            CollectError::Resolve { .. } => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e)
    }
}

impl From<RegistryError> for CollectError {
    fn from(e: RegistryError) -> Self {
        CollectError::Registry(e)
    }
}
