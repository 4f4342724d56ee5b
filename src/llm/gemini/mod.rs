//! Gemini provider implementation
//!
//! Generative Language API with function declarations; calls carry no
//! identifiers on this wire, so the mapper fabricates them on decode,
//! and results are addressed back by function name.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::{GeminiClient, GeminiModel};
