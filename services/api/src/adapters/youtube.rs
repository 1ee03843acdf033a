//! services/api/src/adapters/youtube.rs
//!
//! This module contains the adapter for the YouTube Data API search endpoint.
//! It implements the `VideoSearchService` port from the `core` crate.

use async_trait::async_trait;
use codesnack_core::{
    domain::VideoResult,
    ports::{PortError, PortResult, VideoSearchService},
};
use serde::Deserialize;
use tracing::{debug, info};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `VideoSearchService` with a single `search.list` call.
#[derive(Clone)]
pub struct YouTubeSearchAdapter {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl YouTubeSearchAdapter {
    /// Creates a new `YouTubeSearchAdapter`.
    pub fn new(client: reqwest::Client, api_base: String, api_key: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

//=========================================================================================
// Wire Format
//=========================================================================================

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Deserialize)]
struct Thumbnails {
    default: Thumbnail,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn to_domain(self) -> PortResult<VideoResult> {
        let video_id = self.id.video_id.ok_or_else(|| {
            PortError::MalformedResponse("search result has no videoId".to_string())
        })?;
        Ok(VideoResult {
            url: format!("{WATCH_URL}{video_id}"),
            title: self.snippet.title,
            thumbnail_url: self.snippet.thumbnails.default.url,
        })
    }
}

//=========================================================================================
// `VideoSearchService` Trait Implementation
//=========================================================================================

#[async_trait]
impl VideoSearchService for YouTubeSearchAdapter {
    async fn search_first_video(&self, query: &str) -> PortResult<Option<VideoResult>> {
        debug!(query, "Searching YouTube.");
        let response = self
            .client
            .get(format!("{}/search", self.api_base))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", "1"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Request(format!(
                "YouTube search returned HTTP {status}"
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PortError::MalformedResponse(e.to_string()))?;

        match body.items.into_iter().next() {
            Some(item) => item.to_domain().map(Some),
            None => {
                info!(query, "No tutorial video found.");
                Ok(None)
            }
        }
    }
}
