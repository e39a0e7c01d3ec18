//! Error types for upload-to-s3
//!
//! The taxonomy mirrors the failure modes of the upload pipeline: validation
//! problems are detected before any I/O, path resolution covers the
//! parent-of-source guard, and archive/transfer failures carry the full
//! diagnostic text of whatever went wrong underneath.

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the upload pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing request input, detected before any I/O
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Source directory has no resolvable parent to host the temp archive
    #[error("Cannot resolve path: {0}")]
    PathResolution(String),

    /// Archive creation failed (permissions, disk full, I/O)
    #[error("Archive error: {0}")]
    Archive(String),

    /// Network, storage, or service failure during the upload
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// Authentication or authorization failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for everything else
    #[error("{0}")]
    General(String),
}

impl Error {
    /// True for errors that should abort before any filesystem or network work
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = Error::Archive("disk full".to_string());
        assert_eq!(err.to_string(), "Archive error: disk full");

        let err = Error::Transfer("connection reset".to_string());
        assert_eq!(err.to_string(), "Transfer error: connection reset");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::Validation("missing bucket".to_string()).is_validation());
        assert!(!Error::Transfer("timeout".to_string()).is_validation());
    }
}
