//! Function calling service.

use std::sync::Arc;
use tracing::instrument;

use crate::errors::ChatClientResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::tools::{CompleteFunctionCallRequest, FunctionCallRequest};

/// Path of the function-call endpoint.
pub const FUNCTION_CALL_PATH: &str = "/function_call";

/// Path of the function-call completion endpoint.
pub const COMPLETE_FUNCTION_CALL_PATH: &str = "/complete_function_call";

/// Function calling service.
pub struct FunctionCallService {
    transport: Arc<dyn HttpTransport>,
}

impl FunctionCallService {
    /// Creates a new function calling service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Asks the backend to answer `request.query`, calling tools as needed.
    #[instrument(skip(self, request), fields(tools = request.tools.as_ref().map_or(0, Vec::len)))]
    pub async fn function_call(
        &self,
        request: &FunctionCallRequest,
    ) -> ChatClientResult<HttpResponse> {
        let http_request = HttpRequest::post(FUNCTION_CALL_PATH).with_json(request)?;
        Ok(self.transport.send(http_request).await?)
    }

    /// Runs the backend's complete function-call round trip for `query`.
    #[instrument(skip(self, query))]
    pub async fn complete_function_call(
        &self,
        query: impl Into<String>,
    ) -> ChatClientResult<HttpResponse> {
        let body = CompleteFunctionCallRequest {
            query: query.into(),
        };
        let http_request = HttpRequest::post(COMPLETE_FUNCTION_CALL_PATH).with_json(&body)?;
        Ok(self.transport.send(http_request).await?)
    }
}

impl std::fmt::Debug for FunctionCallService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionCallService").finish()
    }
}
