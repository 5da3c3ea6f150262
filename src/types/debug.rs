//! Debug endpoint types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default number of log lines the backend returns.
pub const DEFAULT_LOG_LINES: u32 = 100;

/// Current debug state of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugStatus {
    /// Verbose request logging enabled.
    pub debug_mode: bool,
    /// Canned responses instead of model calls.
    pub test_mode: bool,
    /// Backend log level name, e.g. `"INFO"`.
    pub log_level: String,
    /// Liveness marker.
    pub api_status: String,
}

/// Settings to change on the backend. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugUpdate {
    /// New debug mode.
    pub debug_mode: Option<bool>,
    /// New test mode.
    pub test_mode: Option<bool>,
    /// New log level name (case-insensitive on the backend).
    pub log_level: Option<String>,
}

impl DebugUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets debug mode.
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = Some(enabled);
        self
    }

    /// Sets test mode.
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = Some(enabled);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Returns the set fields as query parameters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = self.debug_mode {
            pairs.push(("debug_mode".to_string(), v.to_string()));
        }
        if let Some(v) = self.test_mode {
            pairs.push(("test_mode".to_string(), v.to_string()));
        }
        if let Some(v) = &self.log_level {
            pairs.push(("log_level".to_string(), v.clone()));
        }
        pairs
    }
}

/// Result of a debug update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugUpdateResult {
    /// Whether anything changed.
    pub updated: bool,
    /// Settings that were applied.
    #[serde(default)]
    pub settings: Map<String, Value>,
    /// Informational message when nothing was sent.
    #[serde(default)]
    pub message: Option<String>,
    /// Rejection reason, e.g. an unknown log level.
    #[serde(default)]
    pub error: Option<String>,
}

/// Tail of the backend log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Log lines, oldest first.
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    /// Read failure reported by the backend.
    #[serde(default)]
    pub error: Option<String>,
}
