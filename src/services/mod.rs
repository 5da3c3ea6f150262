//! Service implementations for the site chat API.
//!
//! Each service owns a handle to the shared transport and maps one group
//! of backend routes onto async methods.

mod chat;
mod debug;
mod function_call;

pub use chat::{ChatService, CHAT_PATH, MULTI_TURN_CHAT_PATH};
pub use debug::{DebugService, DEBUG_PATH, LOGS_PATH};
pub use function_call::{FunctionCallService, COMPLETE_FUNCTION_CALL_PATH, FUNCTION_CALL_PATH};
