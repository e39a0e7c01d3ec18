//! Destination bucket path and object key resolution
//!
//! A pure function: no I/O, no side effects, fully deterministic. The
//! validation layer is responsible for lower-casing the bucket before it
//! reaches `resolve` (S3 bucket names are not case-safe).

use std::path::Path;

use serde::Serialize;

/// Where an upload will land: computed once per request, immutable after
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDestination {
    /// Bucket, optionally followed by "/" and a subdirectory prefix
    pub bucket_path: String,
    /// Object key within the bucket path
    pub object_key: String,
}

/// Resolve the destination for an upload.
///
/// `bucket_path` is `bucket` when `subdir` is empty, else `bucket/subdir`.
/// `object_key` is `name_override` when non-empty, else `default_name`
/// (the directory's own name for directory uploads, the file name without
/// its extension for file uploads).
pub fn resolve(
    bucket: &str,
    subdir: Option<&str>,
    name_override: Option<&str>,
    default_name: &str,
) -> ResolvedDestination {
    let bucket_path = match subdir.filter(|s| !s.is_empty()) {
        Some(sub) => format!("{bucket}/{sub}"),
        None => bucket.to_string(),
    };

    let object_key = match name_override.filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => default_name.to_string(),
    };

    ResolvedDestination {
        bucket_path,
        object_key,
    }
}

/// Default object key for a directory upload: the directory's own name
pub fn directory_default_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Default object key for a file upload: the file name with its extension
/// stripped
pub fn file_default_name(path: &Path) -> Option<String> {
    path.file_stem().map(|n| n.to_string_lossy().into_owned())
}
