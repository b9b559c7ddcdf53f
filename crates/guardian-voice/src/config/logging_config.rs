use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log file output. Console logging is always on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file.
    #[serde(default)]
    pub file_logging: bool,

    /// Write the log file as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Log directory; defaults to `logs` under the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}
