//! Web article lookup backed by Google Custom Search v1

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use super::format::host_from_url;
use super::{Article, SearchError, WebSearch};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API caps a single request at ten results
const MAX_RESULTS_PER_REQUEST: u32 = 10;

/// Client for the Google Custom Search JSON API
pub struct GoogleSearchClient {
    http_client: Client,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    /// Create a new client. Key or engine id may be empty; lookups will
    /// then fail with a `MissingKey` error at call time.
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        })
    }
}

#[async_trait]
impl WebSearch for GoogleSearchClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Article>, SearchError> {
        if self.api_key.is_empty() || self.engine_id.is_empty() {
            return Err(SearchError::MissingKey {
                service: "Google Search",
            });
        }

        let num_param = max_results.min(MAX_RESULTS_PER_REQUEST).to_string();
        let response = self
            .http_client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num_param.as_str()),
                ("safe", "active"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Google Custom Search request failed");
            return Err(SearchError::RequestFailed {
                service: "Google Search",
                status: status.as_u16(),
                body,
            });
        }

        let data: CustomSearchResponse = response.json().await?;
        let articles = data
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Article::from_item(index, item))
            .collect();

        Ok(articles)
    }
}

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<SearchResultItem>,
}

#[derive(Debug, Deserialize)]
struct SearchResultItem {
    title: String,
    #[serde(default)]
    snippet: String,
    link: String,
    pagemap: Option<PageMap>,
}

#[derive(Debug, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<serde_json::Value>,
}

impl Article {
    fn from_item(index: usize, item: SearchResultItem) -> Self {
        let published_date = item
            .pagemap
            .as_ref()
            .and_then(|pagemap| pagemap.metatags.first())
            .and_then(|tags| tags.get("article:published_time"))
            .and_then(|value| value.as_str())
            .map(str::to_string);

        Article {
            id: format!("search-{}-{}", index, Uuid::new_v4()),
            title: item.title,
            snippet: item.snippet,
            source: host_from_url(&item.link),
            url: item.link,
            published_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_from_item_with_metadata() {
        let item: SearchResultItem = serde_json::from_value(serde_json::json!({
            "title": "Sourdough guide",
            "snippet": "Everything about sourdough",
            "link": "https://www.bakery.example.com/sourdough",
            "pagemap": {
                "metatags": [{"article:published_time": "2024-03-01T08:00:00Z"}]
            }
        }))
        .unwrap();

        let article = Article::from_item(0, item);
        assert!(article.id.starts_with("search-0-"));
        assert_eq!(article.source, "bakery.example.com");
        assert_eq!(
            article.published_date.as_deref(),
            Some("2024-03-01T08:00:00Z")
        );
    }

    #[test]
    fn test_article_from_item_without_pagemap() {
        let item: SearchResultItem = serde_json::from_value(serde_json::json!({
            "title": "Guide",
            "snippet": "A guide",
            "link": "https://example.com/guide"
        }))
        .unwrap();

        let article = Article::from_item(3, item);
        assert!(article.id.starts_with("search-3-"));
        assert_eq!(article.source, "example.com");
        assert!(article.published_date.is_none());
    }

    #[test]
    fn test_empty_response_decodes_to_no_items() {
        let data: CustomSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(data.items.is_empty());
    }

    #[tokio::test]
    async fn test_empty_key_is_missing_key_error() {
        let client = GoogleSearchClient::new("", "engine").unwrap();
        let err = client.search("anything", 5).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::MissingKey {
                service: "Google Search"
            }
        ));
    }
}
