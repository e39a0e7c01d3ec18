//! uts-s3: AWS SDK adapter for upload-to-s3
//!
//! Implements the ObjectUploader trait from uts-core on top of aws-sdk-s3.

pub mod client;

pub use client::S3Uploader;
