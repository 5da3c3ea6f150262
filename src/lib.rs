//! Site Chat Client Library
//!
//! An async Rust client for the construction-site assistant backend. It
//! wraps the backend's chat, function-calling and debug routes behind a
//! preconfigured HTTP client: every route lives under `/api` on the
//! configured origin and every request is bounded by a 30 second timeout
//! unless configured otherwise.
//!
//! The client is thin. Operations serialize their payload,
//! send one request and return the raw [`HttpResponse`]. Status codes are
//! not interpreted and nothing is retried; typed response models such as
//! [`ChatAnswer`] are available for callers who want to decode the body.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use site_chat_client::{ChatClient, ChatMessage, ChatRequest, ChatAnswer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChatClient::from_env()?;
//!
//!     let request = ChatRequest::new("continue").history(vec![
//!         ChatMessage::user("Which zones are closed today?"),
//!         ChatMessage::assistant("Zone B is closed for concrete pouring."),
//!     ]);
//!
//!     let response = client.multi_turn_chat(&request).await?;
//!     match response.error_detail() {
//!         Some(detail) => eprintln!("backend error: {}", detail),
//!         None => println!("{}", response.json::<ChatAnswer>()?.answer),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Function Calling
//!
//! ```rust,no_run
//! use site_chat_client::{ChatClient, FunctionCallOutcome, FunctionCallRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChatClient::new()?;
//!
//!     let response = client
//!         .function_call(&FunctionCallRequest::from_query("How many workers are on site?"))
//!         .await?;
//!
//!     if let FunctionCallOutcome::ToolsExecuted(answer) = response.json()? {
//!         for call in &answer.tool_calls {
//!             println!("{} -> success={}", call.function_name, call.success);
//!         }
//!         println!("{}", answer.answer);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{ChatClient, ChatClientBuilder};
pub use config::{ChatClientConfig, BASE_PATH, DEFAULT_TIMEOUT};
pub use errors::{ChatClientError, ChatClientResult};
pub use transport::{HttpResponse, TransportError};

// Type re-exports
pub use types::chat::{ChatAnswer, ChatMessage, ChatRequest, Role};
pub use types::common::ApiErrorBody;
pub use types::debug::{DebugStatus, DebugUpdate, DebugUpdateResult, LogsResponse};
pub use types::tools::{
    AssistantReply, CompleteFunctionCallRequest, ExecutedToolCall, FunctionCallAnswer,
    FunctionCallOutcome, FunctionCallRequest, FunctionDefinition, Tool,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
