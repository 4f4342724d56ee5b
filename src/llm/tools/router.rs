//! Dispatch of normalized tool calls to the injected lookup services

use std::sync::Arc;

use thiserror::Error;

use super::catalog::{SearchArgs, VIDEO_SEARCH, WEB_SEARCH};
use crate::search::{Article, SearchError, Video, VideoSearch, WebSearch};

/// Routes a tool call to the matching lookup service.
///
/// The services are caller-supplied; the router owns no network code of
/// its own.
pub struct ToolRouter {
    video: Arc<dyn VideoSearch>,
    web: Arc<dyn WebSearch>,
}

/// Typed result of a single tool execution
#[derive(Debug, Clone)]
pub enum ToolOutput {
    Videos(Vec<Video>),
    Articles(Vec<Article>),
}

impl ToolOutput {
    /// JSON payload sent back to the provider as the tool result
    pub fn wire_payload(&self) -> String {
        let serialized = match self {
            ToolOutput::Videos(videos) => serde_json::to_string(videos),
            ToolOutput::Articles(articles) => serde_json::to_string(articles),
        };
        serialized.unwrap_or_else(|_| "[]".to_string())
    }
}

/// Errors from dispatching a single tool call
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model asked for a tool that is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The call's arguments did not match the tool's schema
    #[error("Failed to deserialize arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// The lookup service itself failed
    #[error(transparent)]
    Lookup(#[from] SearchError),
}

impl ToolRouter {
    pub fn new(video: Arc<dyn VideoSearch>, web: Arc<dyn WebSearch>) -> Self {
        Self { video, web }
    }

    /// Execute one tool call against the matching service
    pub async fn dispatch(
        &self,
        name: &str,
        input: &serde_json::Value,
    ) -> Result<ToolOutput, ToolError> {
        match name {
            VIDEO_SEARCH => {
                let args: SearchArgs = serde_json::from_value(input.clone())?;
                let videos = self.video.search(&args.query, args.max_results).await?;
                Ok(ToolOutput::Videos(videos))
            }
            WEB_SEARCH => {
                let args: SearchArgs = serde_json::from_value(input.clone())?;
                let articles = self.web.search(&args.query, args.max_results).await?;
                Ok(ToolOutput::Articles(articles))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
