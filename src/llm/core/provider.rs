//! Provider trait, selector, and factory

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    error::LlmError,
    types::{CompletionRequest, CompletionResponse},
};
use crate::llm::claude::{ClaudeClient, ClaudeModel};
use crate::llm::gemini::{GeminiClient, GeminiModel};
use crate::llm::openai::{OpenAiClient, OpenAiModel};

/// Main interface that all completion-endpoint implementations satisfy.
///
/// One call is one blocking request/response round with the provider.
/// The two-round tool-calling exchange is driven above this trait.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a completion request and return the normalized assistant turn
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Selector for the three supported completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Claude,
    Gemini,
}

impl Provider {
    /// Wire identifier for the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a provider identifier is not one of the known three
#[derive(Debug, Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "claude" => Ok(Provider::Claude),
            "gemini" => Ok(Provider::Gemini),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Create a completion client for the selected provider.
///
/// Takes the already-decrypted API key for that provider; key presence
/// is checked by the caller before this point. Each provider uses its
/// default chat model.
///
/// # Errors
///
/// Returns an error if the underlying HTTP client cannot be built.
pub fn create_provider(
    provider: Provider,
    api_key: String,
) -> Result<Box<dyn ChatProvider>, LlmError> {
    match provider {
        Provider::OpenAi => {
            let client = OpenAiClient::new(api_key, OpenAiModel::Gpt4oMini)?;
            Ok(Box::new(client))
        }
        Provider::Claude => {
            let client = ClaudeClient::new(api_key, ClaudeModel::Sonnet45)?;
            Ok(Box::new(client))
        }
        Provider::Gemini => {
            let client = GeminiClient::new(api_key, GeminiModel::FlashLatest)?;
            Ok(Box::new(client))
        }
    }
}
