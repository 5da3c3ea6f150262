//! Chat request and response types.

use serde::{Deserialize, Serialize};

/// Author of a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking.
    User,
    /// The assistant answering.
    Assistant,
}

/// One turn in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the turn.
    pub role: Role,
    /// Text of the turn.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Input of a single chat invocation.
///
/// Used by both the simple and the multi-turn chat endpoints. Fields left
/// as `None` are not serialized, so the backend applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's prompt.
    pub prompt: String,

    /// System message overriding the backend's default persona.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Earlier turns of the conversation, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ChatMessage>>,
}

impl ChatRequest {
    /// Creates a request carrying only a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_message: None,
            history: None,
        }
    }

    /// Sets the system message.
    pub fn system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// Sets the conversation history.
    pub fn history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = Some(history);
        self
    }

    /// Appends one turn to the history, creating it if absent.
    pub fn push_history(mut self, message: ChatMessage) -> Self {
        self.history.get_or_insert_with(Vec::new).push(message);
        self
    }
}

/// Successful answer of the chat endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// Status code reported by the upstream model service.
    pub status_code: u16,
    /// Upstream request identifier.
    pub request_id: String,
    /// Model answer.
    pub answer: String,
}
