//! upload command - Upload a file or directory to object storage
//!
//! Directories are archived into a temp zip and uploaded as a single object;
//! plain files are uploaded as-is. The progress observer drives an indicatif
//! bar unless quiet or JSON mode is active.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use uts_core::{Credentials, DEFAULT_REGION, ProgressEvent, UploadRequest, run_upload};
use uts_s3::S3Uploader;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a local file or directory to an S3-compatible bucket
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file or directory to upload
    pub source: PathBuf,

    /// Destination bucket (canonicalized to lowercase)
    #[arg(short, long)]
    pub bucket: String,

    /// Access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true, default_value = "")]
    pub access_key: String,

    /// Secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true, default_value = "")]
    pub secret_key: String,

    /// Storage region
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Destination object name (default: source directory name, or file name
    /// without extension)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Subdirectory within the bucket
    #[arg(long)]
    pub subdir: Option<String>,

    /// Custom endpoint URL for S3-compatible services (forces path-style
    /// addressing)
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// JSON output for a completed upload
#[derive(Debug, Serialize)]
struct UploadOutput {
    source: String,
    bucket_path: String,
    object_key: String,
    archived: bool,
    size_bytes: u64,
}

/// Execute the upload command
pub async fn execute(args: UploadArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut request = UploadRequest::new(
        &args.source,
        &args.bucket,
        Credentials::new(&args.access_key, &args.secret_key),
    );
    request.region = args.region.clone();
    request.subdir = args.subdir.clone();
    request.key_override = args.name.clone();
    request.endpoint = args.endpoint.clone();

    // Fail fast on bad input, before the SDK client is even constructed
    if let Err(e) = request.validate() {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }

    let uploader = match S3Uploader::new(
        &request.credentials,
        &request.region,
        request.endpoint.as_deref(),
    )
    .await
    {
        Ok(u) => u,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let progress = if formatter.is_quiet() || formatter.is_json() {
        None
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {percent}% {msg}")
                .expect("Valid template")
                .progress_chars("#>-"),
        );
        pb.set_message("Uploading...");
        Some(pb)
    };

    let bar = progress.clone();
    let observer = move |event: ProgressEvent| {
        if let Some(pb) = &bar {
            pb.set_position(event.percent_done.round() as u64);
        }
    };

    formatter.info(&format!("Uploading '{}'", args.source.display()));
    let started = Instant::now();

    let outcome = match run_upload(request, &uploader, &observer).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(pb) = &progress {
                pb.abandon();
            }
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    if let Some(pb) = &progress {
        pb.finish_with_message("Done");
    }

    if formatter.is_json() {
        let output = UploadOutput {
            source: args.source.display().to_string(),
            bucket_path: outcome.destination.bucket_path.clone(),
            object_key: outcome.destination.object_key.clone(),
            archived: outcome.archived,
            size_bytes: outcome.size_bytes,
        };
        formatter.json(&output);
    } else {
        let size = formatter.style_size(&humansize::format_size(
            outcome.size_bytes,
            humansize::BINARY,
        ));
        let target = formatter.style_name(&format!(
            "{}/{}",
            outcome.destination.bucket_path, outcome.destination.object_key
        ));
        let what = if outcome.archived {
            "directory archive"
        } else {
            "file"
        };
        formatter.info(&format!(
            "Uploaded {what} to '{target}' ({size}) in {:.1?}",
            started.elapsed()
        ));
    }

    ExitCode::Success
}
