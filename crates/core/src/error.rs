//! Error types for loading training data

use thiserror::Error;

/// Result alias used by every importer accessor
pub type Result<T> = std::result::Result<T, DataLoadError>;

/// Failure to produce one of the four training entities
///
/// Raised by leaf importers when a required path is missing, unreadable
/// or malformed. Wrapping importers never catch it: the first error of a
/// combined call aborts the whole call.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Training data path not found: {0}")]
    NotFound(String),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid training data in '{path}': {message}")]
    InvalidFormat { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataLoadError {
    pub fn io(path: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn parse(path: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid(path: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DataLoadError::parse("data/nlu.yml", "unexpected token");
        assert_eq!(
            err.to_string(),
            "Failed to parse 'data/nlu.yml': unexpected token"
        );

        let err = DataLoadError::NotFound("missing/".to_string());
        assert!(err.to_string().contains("missing/"));
    }
}
