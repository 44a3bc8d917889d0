//! Error types for scaffolder-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using scaffolder-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification surfaced to invokers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing answer
    Validation,
    /// Filesystem failure
    Io,
    /// Template corpus present but structurally unexpected
    Template,
}

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// An answer failed its validator
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// A required answer was not supplied
    #[error("Missing required answer: {field}")]
    MissingAnswer { field: String },

    /// Filesystem operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Destination directory already exists
    #[error("Directory already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    /// Template corpus is misconfigured
    #[error("Template error: {message}")]
    Template { message: String },

    /// Corpus manifest could not be parsed
    #[error("Failed to parse {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing answer error
    pub fn missing_answer(field: impl Into<String>) -> Self {
        Self::MissingAnswer {
            field: field.into(),
        }
    }

    /// Create an IO error with a human-readable context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: &Path) -> Self {
        Self::DestinationExists {
            path: path.to_path_buf(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::MissingAnswer { .. } => ErrorKind::Validation,
            Self::Io { .. } | Self::DestinationExists { .. } => ErrorKind::Io,
            Self::Template { .. } | Self::Manifest { .. } => ErrorKind::Template,
        }
    }
}

/// Attach path context to `std::io::Result` values
pub(crate) trait IoResultExt<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io(format!("Failed to {} {}", action, path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::validation("teamId", "bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::missing_answer("appName").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::destination_exists(Path::new("app")).kind(),
            ErrorKind::Io
        );
        assert_eq!(Error::template("empty").kind(), ErrorKind::Template);
    }

    #[test]
    fn test_io_context_in_message() {
        let err = Err::<(), _>(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ))
        .with_path("write", Path::new("out/app.json"));
        let message = err.unwrap_err().to_string();
        assert!(message.contains("Failed to write out/app.json"));
        assert!(message.contains("denied"));
    }
}
