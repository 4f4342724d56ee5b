//! Video lookup backed by the YouTube Data API v3
//!
//! Two-step lookup: a search call resolves matching video ids, then a
//! videos call fetches the snippet, duration, and statistics needed to
//! build display-ready results.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::format::{format_duration, format_view_count};
use super::{SearchError, Video, VideoSearch};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Client for the YouTube Data API v3
pub struct YouTubeClient {
    http_client: Client,
    api_key: String,
}

impl YouTubeClient {
    /// Create a new client. The key may be empty; lookups will then
    /// fail with a `MissingKey` error at call time.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
        })
    }

    async fn search_video_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, SearchError> {
        let max_results_param = max_results.to_string();
        let response = self
            .http_client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results_param.as_str()),
                ("relevanceLanguage", "ko"),
                ("safeSearch", "strict"),
                ("videoEmbeddable", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "YouTube search request failed");
            return Err(SearchError::RequestFailed {
                service: "YouTube",
                status: status.as_u16(),
                body,
            });
        }

        let data: SearchListResponse = response.json().await?;
        Ok(data
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    async fn fetch_video_details(&self, ids: &[String]) -> Result<Vec<Video>, SearchError> {
        let ids_param = ids.join(",");
        let response = self
            .http_client
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("id", ids_param.as_str()),
                ("part", "contentDetails,statistics,snippet"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "YouTube details request failed");
            return Err(SearchError::RequestFailed {
                service: "YouTube",
                status: status.as_u16(),
                body,
            });
        }

        let data: VideoListResponse = response.json().await?;
        Ok(data.items.into_iter().map(Video::from).collect())
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingKey { service: "YouTube" });
        }

        let ids = self.search_video_ids(query, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.fetch_video_details(&ids).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: Snippet,
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

impl From<VideoItem> for Video {
    fn from(item: VideoItem) -> Self {
        // Prefer the medium thumbnail, fall back to default
        let thumbnail_url = item
            .snippet
            .thumbnails
            .medium
            .or(item.snippet.thumbnails.default)
            .map(|thumb| thumb.url)
            .unwrap_or_default();

        let view_count = item
            .statistics
            .view_count
            .as_deref()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(0);

        let url = format!("https://www.youtube.com/watch?v={}", item.id);

        Video {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail_url,
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
            duration: format_duration(&item.content_details.duration),
            view_count: format_view_count(view_count),
            url,
        }
    }
}
