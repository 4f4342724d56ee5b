//! Lookup services backing the assistant's two tools
//!
//! `VideoSearch` and `WebSearch` are the injectable seams: the
//! assistant only sees the traits, hosts choose the implementations.
//! `YouTubeClient` and `GoogleSearchClient` are the real ones.

pub mod format;
pub mod web;
pub mod youtube;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use web::GoogleSearchClient;
pub use youtube::YouTubeClient;

/// A single video result, in the shape fed back to the model
/// and surfaced to the host for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: String,
    /// Reformatted as `H:MM:SS` or `M:SS`
    pub duration: String,
    /// Reformatted with `K`/`M` suffixes
    pub view_count: String,
    pub url: String,
}

/// A single web article result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub url: String,
    /// Bare hostname with any `www.` prefix stripped
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// Errors from the lookup services
#[derive(Debug, Error)]
pub enum SearchError {
    /// The service's API key (or engine id) was not supplied
    #[error("{service} API key not configured")]
    MissingKey { service: &'static str },

    /// The service returned a non-success status
    #[error("{service} request failed (status {status}): {body}")]
    RequestFailed {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Transport-level failure or undecodable response body
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Video lookup service
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError>;
}

/// Web article lookup service
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Article>, SearchError>;
}
