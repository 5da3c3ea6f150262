//! Chat service.

use std::sync::Arc;
use tracing::instrument;

use crate::errors::ChatClientResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::chat::ChatRequest;

/// Path of the single-turn chat endpoint.
pub const CHAT_PATH: &str = "/chat";

/// Path of the multi-turn chat endpoint.
pub const MULTI_TURN_CHAT_PATH: &str = "/multi_turn_chat";

/// Chat service covering the single- and multi-turn endpoints.
pub struct ChatService {
    transport: Arc<dyn HttpTransport>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Sends a single-turn chat request.
    ///
    /// The backend uses only `prompt` and `system_message` here; `history`
    /// is still sent when set.
    #[instrument(skip(self, request), fields(history_len = request.history.as_ref().map_or(0, Vec::len)))]
    pub async fn simple_chat(&self, request: &ChatRequest) -> ChatClientResult<HttpResponse> {
        self.post(CHAT_PATH, request).await
    }

    /// Sends a chat request together with its conversation history.
    #[instrument(skip(self, request), fields(history_len = request.history.as_ref().map_or(0, Vec::len)))]
    pub async fn multi_turn_chat(&self, request: &ChatRequest) -> ChatClientResult<HttpResponse> {
        self.post(MULTI_TURN_CHAT_PATH, request).await
    }

    async fn post(&self, path: &str, request: &ChatRequest) -> ChatClientResult<HttpResponse> {
        let http_request = HttpRequest::post(path).with_json(request)?;
        Ok(self.transport.send(http_request).await?)
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport};
    use crate::transport::HttpMethod;
    use crate::types::chat::ChatMessage;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn service() -> (ChatService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        (ChatService::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_simple_chat_posts_request_unmodified() {
        let (service, transport) = service();
        transport.queue_json(&json!({"status_code": 200, "request_id": "r", "answer": "ok"}));

        let request = ChatRequest::new("Is the crane inspected?").system_message("be brief");
        let response = service.simple_chat(&request).await.unwrap();
        assert_eq!(response.status, 200);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path, "/chat");

        let body: ChatRequest = serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, request);
    }

    #[tokio::test]
    async fn test_multi_turn_chat_keeps_history_order() {
        let (service, transport) = service();
        transport.queue_json(&json!({"status_code": 200, "request_id": "r", "answer": "ok"}));

        let request = ChatRequest::new("continue").history(vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ]);
        service.multi_turn_chat(&request).await.unwrap();

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.path, "/multi_turn_chat");

        let body: Value = serde_json::from_slice(recorded.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["prompt"], json!("continue"));
        assert_eq!(
            body["history"],
            json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
    }

    #[tokio::test]
    async fn test_error_status_is_returned_as_response() {
        let (service, transport) = service();
        transport.queue(MockResponse::detail(500, "chat request failed: upstream down"));

        let response = service.simple_chat(&ChatRequest::new("hi")).await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(
            response.error_detail().as_deref(),
            Some("chat request failed: upstream down")
        );
    }
}
