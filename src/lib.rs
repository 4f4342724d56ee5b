//! studymate: multi-provider tool-calling chat core
//!
//! The library behind a learning-assistant chat: it routes a user turn
//! to one of three interchangeable completion providers, drives the
//! two-round "model requests tools, host executes, host resubmits"
//! exchange against two injected lookup services, and returns the
//! final prose plus the video and article results for rendering.
//! A small AEAD codec protects stored API keys on the way in.

// Provider abstraction, tool catalog, and orchestration
pub mod llm;

// Video and web lookup services
pub mod search;

// Credential bundle and at-rest encryption
pub mod credentials;

pub use credentials::{ApiCredentials, CredentialCodec, CredentialStore, CryptoError};
pub use llm::{Assistant, AssistantConfig, AssistantError, AssistantReply, Provider};
pub use search::{Article, SearchError, Video, VideoSearch, WebSearch};
