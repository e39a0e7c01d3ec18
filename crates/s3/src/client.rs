//! S3 uploader implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectUploader trait from uts-core.
//! Small files go up in a single put_object; larger ones use a multipart
//! upload so progress can be reported per part.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_smithy_types::byte_stream::Length;
use tracing::{debug, warn};

use uts_core::{
    Credentials, Error, ObjectUploader, ProgressEvent, ProgressObserver, Result,
};

/// Files at or below this size are uploaded with a single put_object
const MULTIPART_THRESHOLD: u64 = 8 * 1024 * 1024;

/// Size of each multipart part (S3 minimum is 5 MiB)
const PART_SIZE: u64 = 8 * 1024 * 1024;

/// S3 transfer capability backed by aws-sdk-s3
pub struct S3Uploader {
    inner: aws_sdk_s3::Client,
}

impl S3Uploader {
    /// Create a new uploader from static credentials.
    ///
    /// When `endpoint` is given (S3-compatible services like MinIO or
    /// RustFS), path-style addressing is forced for compatibility.
    pub async fn new(credentials: &Credentials, region: &str, endpoint: Option<&str>) -> Result<Self> {
        let sdk_credentials = aws_credential_types::Credentials::new(
            credentials.access_key.clone(),
            credentials.secret_key.clone(),
            None, // session token
            None, // expiry
            "uts-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(sdk_credentials)
            .region(aws_config::Region::new(region.to_string()));

        if let Some(url) = endpoint {
            loader = loader.endpoint_url(url);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(endpoint.is_some())
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Format AWS SDK error into a detailed error message
    fn format_sdk_error<E: std::fmt::Display>(error: &aws_sdk_s3::error::SdkError<E>) -> String {
        match error {
            aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                let meta = service_err.raw();
                let mut msg = format!("Service error: {}", err);
                // Try to extract additional error information from headers
                if let Some(code) = meta.headers().get("x-amz-error-code") {
                    if let Ok(code_str) = std::str::from_utf8(code.as_bytes()) {
                        msg.push_str(&format!(" (code: {})", code_str));
                    }
                }
                msg
            }
            aws_sdk_s3::error::SdkError::ConstructionFailure(err) => {
                format!("Request construction failed: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::TimeoutError(_) => "Request timeout".to_string(),
            aws_sdk_s3::error::SdkError::DispatchFailure(err) => {
                format!("Network dispatch error: {:?}", err)
            }
            aws_sdk_s3::error::SdkError::ResponseError(err) => {
                format!("Response error: {:?}", err)
            }
            _ => error.to_string(),
        }
    }

    /// Map a formatted SDK error into the core taxonomy
    fn classify(msg: String) -> Error {
        if msg.contains("AccessDenied")
            || msg.contains("InvalidAccessKeyId")
            || msg.contains("SignatureDoesNotMatch")
        {
            Error::Auth(msg)
        } else {
            Error::Transfer(msg)
        }
    }

    async fn put_single(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        on_progress: ProgressObserver<'_>,
    ) -> Result<()> {
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| Error::Transfer(format!("cannot read '{}': {e}", local.display())))?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| Self::classify(Self::format_sdk_error(&e)))?;

        on_progress(ProgressEvent::new(100.0));
        Ok(())
    }

    async fn put_multipart(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        size: u64,
        on_progress: ProgressObserver<'_>,
    ) -> Result<()> {
        let layout = PartLayout::for_size(size, PART_SIZE);
        debug!(
            size,
            parts = layout.part_count,
            part_size = layout.part_size,
            "Starting multipart upload"
        );

        let created = self
            .inner
            .create_multipart_upload()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::classify(Self::format_sdk_error(&e)))?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| Error::Transfer("no upload id in multipart response".to_string()))?
            .to_string();

        match self
            .upload_parts(local, bucket, key, &upload_id, &layout, size, on_progress)
            .await
        {
            Ok(parts) => {
                let completed = CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build();
                self.inner
                    .complete_multipart_upload()
                    .bucket(bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .multipart_upload(completed)
                    .send()
                    .await
                    .map_err(|e| Self::classify(Self::format_sdk_error(&e)))?;
                Ok(())
            }
            Err(e) => {
                // Abort so the partial upload does not linger (and bill) server-side
                if let Err(abort_err) = self
                    .inner
                    .abort_multipart_upload()
                    .bucket(bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .send()
                    .await
                {
                    warn!(
                        error = %Self::format_sdk_error(&abort_err),
                        "Failed to abort multipart upload"
                    );
                }
                Err(e)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn upload_parts(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        upload_id: &str,
        layout: &PartLayout,
        size: u64,
        on_progress: ProgressObserver<'_>,
    ) -> Result<Vec<CompletedPart>> {
        let mut parts = Vec::with_capacity(layout.part_count as usize);
        let mut transferred = 0u64;

        for index in 0..layout.part_count {
            let part_size = layout.size_of_part(index);
            let offset = index * layout.part_size;

            let body = ByteStream::read_from()
                .path(local)
                .offset(offset)
                .length(Length::Exact(part_size))
                .build()
                .await
                .map_err(|e| Error::Transfer(format!("cannot read '{}': {e}", local.display())))?;

            let part_number = (index + 1) as i32;
            let response = self
                .inner
                .upload_part()
                .bucket(bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(body)
                .send()
                .await
                .map_err(|e| Self::classify(Self::format_sdk_error(&e)))?;

            parts.push(
                CompletedPart::builder()
                    .set_e_tag(response.e_tag().map(|t| t.to_string()))
                    .part_number(part_number)
                    .build(),
            );

            transferred += part_size;
            on_progress(ProgressEvent::from_bytes(transferred, size));
            debug!(part_number, transferred, "Uploaded part");
        }

        Ok(parts)
    }
}

#[async_trait]
impl ObjectUploader for S3Uploader {
    async fn upload(
        &self,
        local: &Path,
        bucket_path: &str,
        key: &str,
        on_progress: ProgressObserver<'_>,
    ) -> Result<()> {
        let (bucket, prefix) = split_bucket_path(bucket_path);
        let full_key = match prefix {
            Some(p) => format!("{p}/{key}"),
            None => key.to_string(),
        };

        let size = tokio::fs::metadata(local)
            .await
            .map_err(|e| Error::Transfer(format!("cannot stat '{}': {e}", local.display())))?
            .len();

        if size <= MULTIPART_THRESHOLD {
            self.put_single(local, bucket, &full_key, on_progress).await
        } else {
            self.put_multipart(local, bucket, &full_key, size, on_progress)
                .await
        }
    }
}

/// Split a "bucket" or "bucket/subdir" path into the bucket and the key
/// prefix the SDK expects
fn split_bucket_path(bucket_path: &str) -> (&str, Option<&str>) {
    match bucket_path.split_once('/') {
        Some((bucket, prefix)) => {
            let prefix = prefix.trim_matches('/');
            if prefix.is_empty() {
                (bucket, None)
            } else {
                (bucket, Some(prefix))
            }
        }
        None => (bucket_path, None),
    }
}

/// How a file is cut into multipart parts
#[derive(Debug, PartialEq, Eq)]
struct PartLayout {
    part_count: u64,
    part_size: u64,
    last_part_size: u64,
}

impl PartLayout {
    fn for_size(file_size: u64, part_size: u64) -> Self {
        let full_parts = file_size / part_size;
        let remainder = file_size % part_size;
        if remainder == 0 {
            Self {
                part_count: full_parts.max(1),
                part_size,
                last_part_size: part_size,
            }
        } else {
            Self {
                part_count: full_parts + 1,
                part_size,
                last_part_size: remainder,
            }
        }
    }

    fn size_of_part(&self, index: u64) -> u64 {
        if index + 1 == self.part_count {
            self.last_part_size
        } else {
            self.part_size
        }
    }
}
