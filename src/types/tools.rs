//! Tool and function calling types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool descriptor offered to a function-calling request.
///
/// Every field is optional and left out of the JSON when unset, so
/// `Tool::default()` serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool type, `"function"` for every tool the backend knows.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Function definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionDefinition>,
}

impl Tool {
    /// Creates a new function tool.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            type_: Some("function".to_string()),
            function: Some(FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            }),
        }
    }
}

/// Function definition within a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name.
    pub name: String,

    /// Function description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema for function parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl FunctionDefinition {
    /// Creates a definition with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parameter schema.
    pub fn parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl From<FunctionDefinition> for Tool {
    fn from(function: FunctionDefinition) -> Self {
        Self {
            type_: Some("function".to_string()),
            function: Some(function),
        }
    }
}

/// Input of a function-calling invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallRequest {
    /// Natural-language query.
    pub query: String,

    /// Declared toolset. `None` lets the backend use its defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl FunctionCallRequest {
    /// Creates a request carrying only a query.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tools: None,
        }
    }

    /// Sets the toolset.
    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Appends one tool, creating the toolset if absent.
    pub fn tool(mut self, tool: impl Into<Tool>) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool.into());
        self
    }
}

/// Body of the function-call completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteFunctionCallRequest {
    /// Natural-language query.
    pub query: String,
}

/// Outcome of one tool executed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedToolCall {
    /// Tool call identifier assigned by the model.
    pub id: String,
    /// Name of the executed function.
    pub function_name: String,
    /// Whether the handler ran without error.
    pub success: bool,
    /// Handler result on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Answer of the function-call endpoint after tools were executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallAnswer {
    /// Status code reported by the upstream model service.
    pub status_code: u16,
    /// Upstream request identifier.
    pub request_id: String,
    /// Final model answer built from the tool results.
    pub answer: String,
    /// Tools the backend executed, in call order.
    #[serde(default)]
    pub tool_calls: Vec<ExecutedToolCall>,
}

/// Assistant message returned as-is when the model called no tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Message role, normally `"assistant"`.
    pub role: String,
    /// Message content.
    #[serde(default)]
    pub content: Option<Value>,
}

/// Body of a successful function-call response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionCallOutcome {
    /// The model called tools and produced a final answer.
    ToolsExecuted(FunctionCallAnswer),
    /// The model answered directly.
    Direct(AssistantReply),
}
