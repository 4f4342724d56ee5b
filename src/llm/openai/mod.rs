//! OpenAI provider implementation
//!
//! Chat completions API with function tools; tool-call arguments ride
//! as JSON-encoded strings and results go back as `role: "tool"`
//! messages keyed by call id.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::{OpenAiClient, OpenAiModel};
