//! Debug service for inspecting and tuning the backend.

use std::sync::Arc;
use tracing::instrument;

use crate::errors::ChatClientResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::debug::DebugUpdate;

/// Path of the debug status endpoint.
pub const DEBUG_PATH: &str = "/debug";

/// Path of the log tail endpoint.
pub const LOGS_PATH: &str = "/logs";

/// Debug service.
pub struct DebugService {
    transport: Arc<dyn HttpTransport>,
}

impl DebugService {
    /// Creates a new debug service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetches the backend's debug state. Decodes as `DebugStatus`.
    #[instrument(skip(self))]
    pub async fn status(&self) -> ChatClientResult<HttpResponse> {
        Ok(self.transport.send(HttpRequest::get(DEBUG_PATH)).await?)
    }

    /// Changes debug settings. Decodes as `DebugUpdateResult`.
    ///
    /// The backend reads the settings from the query string, so the
    /// request has no body.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: &DebugUpdate) -> ChatClientResult<HttpResponse> {
        let request = update
            .query_pairs()
            .into_iter()
            .fold(HttpRequest::post(DEBUG_PATH), |req, (name, value)| {
                req.with_query(name, value)
            });
        Ok(self.transport.send(request).await?)
    }

    /// Fetches the last `lines` backend log lines. Decodes as `LogsResponse`.
    #[instrument(skip(self))]
    pub async fn logs(&self, lines: u32) -> ChatClientResult<HttpResponse> {
        let request = HttpRequest::get(LOGS_PATH).with_query("lines", lines);
        Ok(self.transport.send(request).await?)
    }
}

impl std::fmt::Debug for DebugService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugService").finish()
    }
}
