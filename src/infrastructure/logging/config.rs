//! The `logging` section of the client configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how the client core's tracing events are written.
///
/// The CLI is quiet by default: only warnings reach stderr so command output
/// stays readable. `INSPECT_LOGGING__LEVEL=debug` shows every reconcile pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level (trace, debug, info, warn, error). `RUST_LOG`
    /// directives are applied on top.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Rendering of events on stderr.
    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Where `inspect.log` is written. Without it nothing goes to disk.
    pub log_dir: Option<PathBuf>,

    /// Emit events on stderr.
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// How often `inspect.log` rolls over.
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Console rendering. The log file is always JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for piping `boot --json` runs into tools.
    Json,
    /// Human-readable lines.
    Pretty,
}

/// Roll-over schedule for the log file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file each day.
    #[default]
    Daily,
    /// New file each hour.
    Hourly,
    /// A single ever-growing file.
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            log_dir: None,
            enable_console: true,
            rotation: RotationPolicy::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_true() -> bool {
    true
}
