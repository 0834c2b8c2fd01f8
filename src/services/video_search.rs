use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoSearchError {
    #[error("video search request failed: {0}")]
    Transport(String),

    #[error("video search returned status {0}")]
    Status(u16),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns the id of the best matching video, if any.
    async fn search(&self, query: &str) -> Result<Option<String>, VideoSearchError>;
}

pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

pub fn lesson_video_query(title: &str) -> String {
    format!("{} explained", title.trim())
}

pub struct YouTubeVideoSearch {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl YouTubeVideoSearch {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(SEARCH_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

fn first_video_id(response: SearchResponse) -> Option<String> {
    response
        .items
        .into_iter()
        .find_map(|item| item.id.video_id)
        .filter(|id| !id.is_empty())
}

#[async_trait]
impl VideoSearch for YouTubeVideoSearch {
    async fn search(&self, query: &str) -> Result<Option<String>, VideoSearchError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("safeSearch", "strict"),
                ("videoEmbeddable", "true"),
                ("q", query),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| VideoSearchError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(VideoSearchError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| VideoSearchError::Transport(e.without_url().to_string()))?;

        Ok(first_video_id(body))
    }
}
