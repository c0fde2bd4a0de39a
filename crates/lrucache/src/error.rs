//! Error types for lrucache

use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rejected configuration (e.g. zero capacity)
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration("capacity must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be greater than 0"
        );
    }
}
