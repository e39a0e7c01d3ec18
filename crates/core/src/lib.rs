//! uts-core: Core library for the upload-to-s3 CLI
//!
//! This crate provides the core functionality for the upload-to-s3 CLI,
//! including:
//! - Upload request validation
//! - Destination bucket path and object key resolution
//! - Directory archiving with temp-archive lifecycle management
//! - The file/directory dispatch pipeline
//! - The ObjectUploader trait for storage transfers
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod archive;
pub mod destination;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod request;
pub mod traits;

pub use archive::{TEMP_ARCHIVE_NAME, TempArchive, create_archive};
pub use destination::{ResolvedDestination, resolve};
pub use error::{Error, Result};
pub use pipeline::{UploadOutcome, run_upload};
pub use progress::{ProgressEvent, ProgressObserver};
pub use request::{Credentials, DEFAULT_REGION, UploadRequest};
pub use traits::ObjectUploader;
