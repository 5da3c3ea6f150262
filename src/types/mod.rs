//! Type definitions for the site chat API.

pub mod chat;
pub mod common;
pub mod debug;
pub mod tools;

pub use chat::*;
pub use common::*;
pub use debug::*;
pub use tools::*;
