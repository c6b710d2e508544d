use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error enum shared by the documentation engine and the server
#[derive(Error, Debug)]
pub enum DocsError {
    /// The page location cannot be turned into a document URL
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Descriptor or identifier validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested document or service does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors, with the path that failed
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for documentation operations
pub type Result<T> = std::result::Result<T, DocsError>;

impl DocsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Attach the failing path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable machine-readable category name
    pub fn error_type(&self) -> &'static str {
        match self {
            DocsError::InvalidLocation(_) => "invalid_location",
            DocsError::Validation(_) => "validation_error",
            DocsError::NotFound(_) => "not_found",
            DocsError::Config(_) => "configuration_error",
            DocsError::Io { .. } => "io_error",
            DocsError::Json(_) => "json_error",
            DocsError::Yaml(_) => "yaml_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_path() {
        let err = DocsError::io(
            "/tmp/missing/openapi.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.error_type(), "io_error");
        assert!(err.to_string().contains("/tmp/missing/openapi.json"));
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DocsError = parse.into();
        assert_eq!(err.error_type(), "json_error");
    }
}
