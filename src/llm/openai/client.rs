//! OpenAI client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    error::LlmError,
    provider::ChatProvider,
    types::{CompletionRequest, CompletionResponse},
};

use super::mapper::{from_openai_response, to_openai_request};

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI model identifiers
#[derive(Debug, Clone)]
pub enum OpenAiModel {
    /// GPT-4o mini
    Gpt4oMini,
}

impl OpenAiModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

/// Client for the OpenAI chat completions API
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key sent as a bearer token
    api_key: String,
    /// Model to use
    model: OpenAiModel,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: OpenAiModel) -> Result<Self, LlmError> {
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
impl ChatProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let openai_request = to_openai_request(request, self.model.as_str());

        let response = self
            .http_client
            .post(ENDPOINT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            tracing::error!(status = status.as_u16(), %body, "OpenAI API request failed");
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        let message = from_openai_response(decoded)?;

        Ok(CompletionResponse { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_model_as_str() {
        assert_eq!(OpenAiModel::Gpt4oMini.as_str(), "gpt-4o-mini");
    }

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("sk-test".to_string(), OpenAiModel::Gpt4oMini);
        assert!(client.is_ok());
    }
}
