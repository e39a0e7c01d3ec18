//! The upload pipeline: validate, dispatch, archive, upload, clean up
//!
//! One request, one upload. A directory source is archived into its parent's
//! temp archive and the archive is uploaded under the directory's name; a
//! plain file is uploaded directly under its stem. The temp archive is
//! removed after the upload attempt whether it succeeded or not.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::archive::create_archive;
use crate::destination::{ResolvedDestination, directory_default_name, file_default_name, resolve};
use crate::error::{Error, Result};
use crate::progress::ProgressObserver;
use crate::request::UploadRequest;
use crate::traits::ObjectUploader;

/// What a completed upload looked like
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub destination: ResolvedDestination,
    /// True when the source was a directory uploaded as a temp archive
    pub archived: bool,
    /// Size of the object that was transferred
    pub size_bytes: u64,
}

/// Run one upload operation end to end.
///
/// Validation happens first; on a validation failure no filesystem mutation
/// or network I/O has occurred. Directory sources take the archive flow,
/// everything else (regular files and any other non-directory path) takes
/// the plain-file flow.
pub async fn run_upload(
    mut request: UploadRequest,
    uploader: &dyn ObjectUploader,
    on_progress: ProgressObserver<'_>,
) -> Result<UploadOutcome> {
    request.validate()?;

    if request.source.is_dir() {
        upload_directory(&request, uploader, on_progress).await
    } else {
        upload_file(&request, uploader, on_progress).await
    }
}

async fn upload_directory(
    request: &UploadRequest,
    uploader: &dyn ObjectUploader,
    on_progress: ProgressObserver<'_>,
) -> Result<UploadOutcome> {
    // Canonicalize once so the parent lookup and the default key both see an
    // absolute path; a relative name like "photos" resolves against the cwd.
    let dir = fs::canonicalize(&request.source)?;
    let default_name = directory_default_name(&dir).ok_or_else(|| {
        Error::PathResolution(format!("directory '{}' has no name", dir.display()))
    })?;

    let destination = resolve(
        &request.bucket,
        request.subdir.as_deref(),
        request.key_override.as_deref(),
        &default_name,
    );

    let archive = create_archive(&dir)?;
    let size_bytes = object_size(archive.path())?;

    info!(
        source = %dir.display(),
        bucket_path = %destination.bucket_path,
        key = %destination.object_key,
        size_bytes,
        "Uploading directory archive"
    );

    let result = uploader
        .upload(
            archive.path(),
            &destination.bucket_path,
            &destination.object_key,
            on_progress,
        )
        .await;

    // Cleanup runs on both the success and the failure path
    if let Err(e) = archive.remove() {
        warn!(path = %archive.path().display(), error = %e, "Failed to remove temp archive");
    }

    result?;

    Ok(UploadOutcome {
        destination,
        archived: true,
        size_bytes,
    })
}

async fn upload_file(
    request: &UploadRequest,
    uploader: &dyn ObjectUploader,
    on_progress: ProgressObserver<'_>,
) -> Result<UploadOutcome> {
    let default_name = file_default_name(&request.source).ok_or_else(|| {
        Error::PathResolution(format!("file '{}' has no name", request.source.display()))
    })?;

    let destination = resolve(
        &request.bucket,
        request.subdir.as_deref(),
        request.key_override.as_deref(),
        &default_name,
    );

    let size_bytes = object_size(&request.source)?;

    info!(
        source = %request.source.display(),
        bucket_path = %destination.bucket_path,
        key = %destination.object_key,
        size_bytes,
        "Uploading file"
    );

    uploader
        .upload(
            &request.source,
            &destination.bucket_path,
            &destination.object_key,
            on_progress,
        )
        .await?;

    Ok(UploadOutcome {
        destination,
        archived: false,
        size_bytes,
    })
}

fn object_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}
