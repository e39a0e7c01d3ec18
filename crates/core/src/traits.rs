//! The ObjectUploader trait: the seam between the pipeline and the storage SDK
//!
//! The pipeline treats the actual byte transfer, including any multipart
//! chunking decisions, as an opaque capability behind this trait. The real
//! implementation lives in the uts-s3 crate; tests substitute their own.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::progress::ProgressObserver;

/// A storage-transfer capability: takes a local file and a resolved
/// destination, performs the upload, and streams progress to the observer.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Upload `local` to `bucket_path` (bucket, optionally with a "/subdir"
    /// suffix) under `key`.
    ///
    /// The observer fires zero or more times during the call, synchronously
    /// on the calling flow of control, with percentages that are
    /// nondecreasing in practice (not enforced here).
    async fn upload(
        &self,
        local: &Path,
        bucket_path: &str,
        key: &str,
        on_progress: ProgressObserver<'_>,
    ) -> Result<()>;
}
