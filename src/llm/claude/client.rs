//! Claude client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    error::LlmError,
    provider::ChatProvider,
    types::{CompletionRequest, CompletionResponse},
};

use super::mapper::{from_claude_response, to_claude_request};

const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Claude model identifiers
#[derive(Debug, Clone)]
pub enum ClaudeModel {
    /// Claude Sonnet 4.5
    Sonnet45,
}

impl ClaudeModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            ClaudeModel::Sonnet45 => "claude-sonnet-4-5",
        }
    }
}

/// Client for the Anthropic messages API
pub struct ClaudeClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key sent in the x-api-key header
    api_key: String,
    /// Model to use
    model: ClaudeModel,
}

impl ClaudeClient {
    /// Create a new Claude client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: ClaudeModel) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ChatProvider for ClaudeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let claude_request = to_claude_request(request, self.model.as_str());

        let response = self
            .http_client
            .post(ENDPOINT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&claude_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            tracing::error!(status = status.as_u16(), %body, "Anthropic API request failed");
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        let message = from_claude_response(decoded)?;

        Ok(CompletionResponse { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_model_as_str() {
        assert_eq!(ClaudeModel::Sonnet45.as_str(), "claude-sonnet-4-5");
    }

    #[test]
    fn test_client_creation() {
        let client = ClaudeClient::new("sk-ant-test".to_string(), ClaudeModel::Sonnet45);
        assert!(client.is_ok());
    }
}
