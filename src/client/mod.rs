//! Site chat API client.
//!
//! Provides the main client interface for talking to the chat backend.

use std::sync::Arc;

use crate::config::{ChatClientConfig, ChatClientConfigBuilder};
use crate::errors::ChatClientResult;
use crate::services::{ChatService, DebugService, FunctionCallService};
use crate::transport::{HttpResponse, HttpTransport, HttpTransportImpl};
use crate::types::chat::ChatRequest;
use crate::types::tools::FunctionCallRequest;

/// The main site chat client.
///
/// Every operation sends exactly one request and hands back the backend's
/// response untouched, whatever its status.
///
/// # Example
///
/// ```rust,no_run
/// use site_chat_client::{ChatClient, ChatRequest, ChatAnswer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ChatClient::builder()
///         .base_url("http://localhost:8000")
///         .build()?;
///
///     let response = client
///         .simple_chat(&ChatRequest::new("How many workers are on site?"))
///         .await?;
///
///     if response.is_success() {
///         let answer: ChatAnswer = response.json()?;
///         println!("{}", answer.answer);
///     }
///     Ok(())
/// }
/// ```
pub struct ChatClient {
    config: ChatClientConfig,
    chat_service: ChatService,
    function_service: FunctionCallService,
    debug_service: DebugService,
}

impl ChatClient {
    /// Creates a new client builder.
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    /// Creates a client with the default configuration.
    pub fn new() -> ChatClientResult<Self> {
        ChatClientBuilder::new().build()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `SITE_CHAT_BASE_URL`, `SITE_CHAT_TIMEOUT` and
    /// `SITE_CHAT_LOG_BODIES`.
    pub fn from_env() -> ChatClientResult<Self> {
        let config = ChatClientConfig::from_env()?;
        ChatClientBuilder::from_config(config).build()
    }

    /// Sends a single-turn chat request to `/chat`.
    pub async fn simple_chat(&self, request: &ChatRequest) -> ChatClientResult<HttpResponse> {
        self.chat_service.simple_chat(request).await
    }

    /// Sends a function-call request to `/function_call`.
    pub async fn function_call(
        &self,
        request: &FunctionCallRequest,
    ) -> ChatClientResult<HttpResponse> {
        self.function_service.function_call(request).await
    }

    /// Sends `{ "query": query }` to `/complete_function_call`.
    pub async fn complete_function_call(
        &self,
        query: impl Into<String>,
    ) -> ChatClientResult<HttpResponse> {
        self.function_service.complete_function_call(query).await
    }

    /// Sends a chat request with history to `/multi_turn_chat`.
    pub async fn multi_turn_chat(&self, request: &ChatRequest) -> ChatClientResult<HttpResponse> {
        self.chat_service.multi_turn_chat(request).await
    }

    /// Returns the chat service.
    pub fn chat(&self) -> &ChatService {
        &self.chat_service
    }

    /// Returns the function calling service.
    pub fn functions(&self) -> &FunctionCallService {
        &self.function_service
    }

    /// Returns the debug service.
    pub fn debug(&self) -> &DebugService {
        &self.debug_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChatClientConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the site chat client.
pub struct ChatClientBuilder {
    config_builder: ChatClientConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ChatClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: ChatClientConfigBuilder::new(),
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ChatClientConfig) -> Self {
        let config_builder = config.custom_headers.into_iter().fold(
            ChatClientConfigBuilder::new()
                .base_url(config.base_url)
                .timeout(config.timeout)
                .log_bodies(config.log_bodies),
            |builder, (name, value)| builder.header(name, value),
        );

        Self {
            config_builder,
            transport: None,
        }
    }

    /// Sets the backend origin.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Writes request and response bodies to debug logs when enabled.
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.log_bodies(enabled);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ChatClientResult<ChatClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(&config)?),
        };

        tracing::debug!(api_root = %config.api_root(), timeout = ?config.timeout, "Built chat client");

        Ok(ChatClient {
            chat_service: ChatService::new(Arc::clone(&transport)),
            function_service: FunctionCallService::new(Arc::clone(&transport)),
            debug_service: DebugService::new(transport),
            config,
        })
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
