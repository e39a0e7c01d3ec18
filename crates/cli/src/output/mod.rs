//! Output configuration and formatting

pub mod formatter;

pub use formatter::Formatter;

/// How the CLI should present its output
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit strict JSON instead of human-readable lines
    pub json: bool,
    /// Suppress informational output (errors still print)
    pub quiet: bool,
    /// Disable ANSI colors
    pub no_color: bool,
}
