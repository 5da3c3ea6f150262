//! Common types shared across endpoints.

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on failure.
///
/// Handler failures carry a plain string; request validation failures
/// carry a list of field errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error detail.
    pub detail: serde_json::Value,
}

impl ApiErrorBody {
    /// Returns the detail as display text.
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
