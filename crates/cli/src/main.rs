//! upload-to-s3: upload a local file or directory to S3-compatible storage
//!
//! Directories are compressed into a temp archive first and uploaded as a
//! single object.

mod commands;
mod exit_code;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::upload::UploadArgs;
use exit_code::ExitCode;
use output::OutputConfig;

/// Upload a local file or directory to an S3-compatible bucket
#[derive(Parser, Debug)]
#[command(name = "upload-to-s3", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    upload: UploadArgs,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // try_parse so argument failures map to the documented exit code rather
    // than clap's default
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::UsageError,
            };
            std::process::exit(code as i32);
        }
    };

    let output_config = OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    let code = commands::upload::execute(cli.upload, output_config).await;
    std::process::exit(code as i32);
}
