//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    error::LlmError,
    provider::ChatProvider,
    types::{CompletionRequest, CompletionResponse},
};

use super::mapper::{from_gemini_response, to_gemini_request};

/// Gemini model identifiers
#[derive(Debug, Clone)]
pub enum GeminiModel {
    /// Latest Flash alias
    FlashLatest,
}

impl GeminiModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::FlashLatest => "gemini-flash-latest",
        }
    }
}

/// Client for the Generative Language API
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key passed as a query parameter
    api_key: String,
    /// Model to use
    model: GeminiModel,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: GeminiModel) -> Result<Self, LlmError> {
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

    /// Build the endpoint URL (the key travels as a query parameter)
    fn build_endpoint_url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model.as_str(),
            self.api_key
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let gemini_request = to_gemini_request(request);

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            tracing::error!(status = status.as_u16(), %body, "Gemini API request failed");
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        let message = from_gemini_response(decoded)?;

        Ok(CompletionResponse { message })
    }
}
