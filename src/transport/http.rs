//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::instrument;

use super::TransportError;
use crate::config::ChatClientConfig;
use crate::errors::{ChatClientError, ChatClientResult};
use crate::observability::{log_request, log_response, loggable_body};
use crate::types::common::ApiErrorBody;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path, relative to the API root.
    pub path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Query string parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a new POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `payload` as the JSON request body.
    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> ChatClientResult<Self> {
        let body = serde_json::to_vec(payload)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in wire order, lowercase names, repeats kept.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the first value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_all(name).next()
    }

    /// Returns every value of header `name` (case-insensitive), in order.
    pub fn header_all<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the `detail` of an error body, if the backend sent one.
    pub fn error_detail(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        self.json::<ApiErrorBody>().ok().map(|e| e.detail_text())
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransportImpl {
    client: Client,
    api_root: String,
    timeout: Duration,
    log_bodies: bool,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport rooted at the config's API prefix.
    pub fn new(config: &ChatClientConfig) -> ChatClientResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.custom_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ChatClientError::configuration(format!("Invalid header name {}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ChatClientError::configuration(format!("Invalid header value: {}", e))
            })?;
            default_headers.insert(name, value);
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| ChatClientError::configuration(e.to_string()))?;

        Ok(Self {
            client,
            api_root: config.api_root(),
            timeout: config.timeout,
            log_bodies: config.log_bodies,
        })
    }

    /// Returns the URL prefix requests are sent under.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Returns the timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns true if request and response bodies are written to debug logs.
    pub fn log_bodies(&self) -> bool {
        self.log_bodies
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if e.is_connect() {
            TransportError::Connection {
                message: e.to_string(),
            }
        } else {
            TransportError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        log_request(
            request.method.as_str(),
            &request.path,
            request
                .body
                .as_deref()
                .map(|b| loggable_body(b, self.log_bodies))
                .as_deref(),
        );

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let started = Instant::now();
        let response = req_builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?
            .to_vec();

        let logged = loggable_body(&body, self.log_bodies);
        log_response(status, started.elapsed().as_millis() as u64, Some(&*logged));

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpTransportImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportImpl")
            .field("api_root", &self.api_root)
            .field("timeout", &self.timeout)
            .field("log_bodies", &self.log_bodies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_uses_config() {
        let config = ChatClientConfig::builder()
            .base_url("http://127.0.0.1:9000")
            .build()
            .unwrap();
        let transport = HttpTransportImpl::new(&config).unwrap();

        assert_eq!(transport.api_root(), "http://127.0.0.1:9000/api");
        assert_eq!(transport.timeout(), Duration::from_millis(30_000));
        assert!(!transport.log_bodies());
        assert_eq!(
            transport.build_url("/function_call"),
            "http://127.0.0.1:9000/api/function_call"
        );
    }

    #[test]
    fn test_transport_rejects_bad_header() {
        let config = ChatClientConfig::builder()
            .header("bad header", "x")
            .build()
            .unwrap();

        assert!(HttpTransportImpl::new(&config).is_err());
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let request = HttpRequest::post("chat")
            .with_json(&serde_json::json!({"prompt": "hi"}))
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(&br#"{"prompt":"hi"}"#[..]));
    }

    #[test]
    fn test_with_query_preserves_order() {
        let request = HttpRequest::post("debug")
            .with_query("debug_mode", true)
            .with_query("log_level", "DEBUG");

        assert_eq!(
            request.query,
            vec![
                ("debug_mode".to_string(), "true".to_string()),
                ("log_level".to_string(), "DEBUG".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_transport_log_bodies_opt_in() {
        let config = ChatClientConfig::builder().log_bodies(true).build().unwrap();
        let transport = HttpTransportImpl::new(&config).unwrap();

        assert!(transport.log_bodies());
    }

    #[test]
    fn test_response_keeps_repeated_headers() {
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("set-cookie".to_string(), "a=1".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
                ("set-cookie".to_string(), "b=2".to_string()),
            ],
            body: Vec::new(),
        };

        assert_eq!(response.header("Set-Cookie"), Some("a=1"));
        assert_eq!(
            response.header_all("set-cookie").collect::<Vec<_>>(),
            vec!["a=1", "b=2"]
        );
        assert!(response.header("x-request-id").is_none());
    }

    #[test]
    fn test_response_error_detail() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: br#"{"detail":"chat request failed"}"#.to_vec(),
        };
        assert!(!response.is_success());
        assert_eq!(response.error_detail().as_deref(), Some("chat request failed"));

        let ok = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: br#"{"detail":"ignored"}"#.to_vec(),
        };
        assert!(ok.error_detail().is_none());
    }
}
