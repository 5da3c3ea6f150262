//! Mock implementations for testing.
//!
//! Provides a recording transport so services and the client can be
//! exercised without a running backend.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, repeats kept.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Creates an error response shaped like the backend's failures.
    pub fn detail(status: u16, detail: &str) -> Self {
        Self::json(&serde_json::json!({ "detail": detail })).with_status(status)
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Appends a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

enum Scripted {
    Respond(MockResponse),
    Fail(TransportError),
}

/// Mock HTTP transport for testing.
///
/// Scripted outcomes are consumed in FIFO order; once they run out the
/// default response is used, or a 500 if none is set.
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.outcomes).push_back(Scripted::Respond(response));
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a transport failure.
    pub fn fail_next(&self, error: TransportError) {
        lock(&self.outcomes).push_back(Scripted::Fail(error));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_outcome(&self) -> Scripted {
        if let Some(outcome) = lock(&self.outcomes).pop_front() {
            return outcome;
        }
        let response = lock(&self.default_response)
            .clone()
            .unwrap_or_else(|| MockResponse::detail(500, "No mock response configured"));
        Scripted::Respond(response)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            body: request.body,
            headers: request.headers,
        });

        match self.next_outcome() {
            Scripted::Respond(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            Scripted::Fail(error) => Err(error),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_then_default() {
        let transport = MockTransport::new();
        transport.queue(
            MockResponse::json(&serde_json::json!({"n": 1}))
                .with_header("x-request-id", "a")
                .with_header("x-request-id", "b"),
        );
        transport.set_default(MockResponse::detail(404, "Not Found"));

        let first = transport.send(HttpRequest::get("/debug")).await.unwrap();
        let second = transport.send(HttpRequest::get("/debug")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(first.header("x-request-id"), Some("a"));
        assert_eq!(first.header_all("x-request-id").count(), 2);
        assert_eq!(second.status, 404);
        assert_eq!(transport.request_count(), 2);

        transport.clear_requests();
        assert!(transport.last_request().is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_returns_500() {
        let transport = MockTransport::new();
        let response = transport.send(HttpRequest::post("/chat")).await.unwrap();
        assert_eq!(response.status, 500);
    }
}
