//! Claude provider implementation
//!
//! Anthropic messages API with content-block tool use; tool results go
//! back as `tool_result` blocks inside a single user message.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::{ClaudeClient, ClaudeModel};
