//! Upload request and validation
//!
//! Validation runs before any archive or network work: credentials must be
//! present, the source must exist, and the bucket must be non-empty. The
//! bucket name is canonicalized to lowercase here, once, so everything
//! downstream (resolution, the SDK call) sees the canonical form.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Region used when the caller does not specify one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Static credentials for the storage endpoint
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// A single upload operation: one source, one destination
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Local file or directory to upload; must exist
    pub source: PathBuf,
    /// Destination bucket; lower-cased by `validate`
    pub bucket: String,
    /// Optional subdirectory appended to the bucket path
    pub subdir: Option<String>,
    /// Optional object key override; defaults derive from the source name
    pub key_override: Option<String>,
    /// Credentials for the storage endpoint
    pub credentials: Credentials,
    /// Storage region
    pub region: String,
    /// Optional custom endpoint URL for S3-compatible services
    pub endpoint: Option<String>,
}

impl UploadRequest {
    pub fn new(source: impl Into<PathBuf>, bucket: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            source: source.into(),
            bucket: bucket.into(),
            subdir: None,
            key_override: None,
            credentials,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
        }
    }

    /// Validate the request and canonicalize the bucket name.
    ///
    /// Must be called before any archive or network work; on failure the
    /// pipeline performs no filesystem mutation and no I/O.
    pub fn validate(&mut self) -> Result<()> {
        if self.credentials.access_key.is_empty() || self.credentials.secret_key.is_empty() {
            return Err(Error::Validation(
                "access key and secret key must both be provided".to_string(),
            ));
        }

        if self.bucket.is_empty() {
            return Err(Error::Validation("bucket name must not be empty".to_string()));
        }
        // S3 bucket names are case-sensitive-unsafe; canonicalize once here
        self.bucket = self.bucket.to_lowercase();

        if !self.source.exists() {
            return Err(Error::Validation(format!(
                "source path does not exist: {}",
                self.source.display()
            )));
        }

        Ok(())
    }
}
