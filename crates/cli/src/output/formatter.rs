//! Output formatter for human-readable and JSON output
//!
//! Severity is a property of the message, decided by the caller; the
//! formatter alone decides how (and whether) to color it, so business logic
//! never touches terminal state. Informational lines carry the `UploadToS3:`
//! prefix and errors the `UploadToS3 Error:` prefix; the color on top of
//! them is cosmetic.

use console::Style;
use serde::Serialize;

use super::OutputConfig;

/// Prefix for informational status lines
const INFO_PREFIX: &str = "UploadToS3:";

/// Prefix for error lines
const ERROR_PREFIX: &str = "UploadToS3 Error:";

/// Color theme for styled output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Informational prefix - cyan
    pub info: Style,
    /// Error prefix - red
    pub error: Style,
    /// Bucket/key names - bold
    pub name: Style,
    /// Byte sizes - green
    pub size: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            info: Style::new().cyan(),
            error: Style::new().red(),
            name: Style::new().bold(),
            size: Style::new().green(),
        }
    }
}

impl Theme {
    /// Returns a theme with no styling (for no-color mode)
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            error: Style::new(),
            name: Style::new(),
            size: Style::new(),
        }
    }
}

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on
/// configuration. When JSON mode is enabled, informational lines are
/// suppressed and the command emits a single structured result instead.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    theme: Theme,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        let theme = if config.no_color || config.json {
            Theme::plain()
        } else {
            Theme::default()
        };
        Self { config, theme }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Style a bucket or key name (bold)
    pub fn style_name(&self, text: &str) -> String {
        self.theme.name.apply_to(text).to_string()
    }

    /// Style a byte size (green)
    pub fn style_size(&self, text: &str) -> String {
        self.theme.size.apply_to(text).to_string()
    }

    /// Output an informational status line with the `UploadToS3:` prefix
    ///
    /// Suppressed in quiet and JSON modes.
    pub fn info(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        let prefix = self.theme.info.apply_to(INFO_PREFIX);
        println!("{prefix} {message}");
    }

    /// Output an error line with the `UploadToS3 Error:` prefix
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            let prefix = self.theme.error.apply_to(ERROR_PREFIX);
            eprintln!("{prefix} {message}");
        }
    }

    /// Output JSON directly
    ///
    /// Used for the structured result object in `--json` mode.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
