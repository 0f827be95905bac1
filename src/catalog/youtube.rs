use serde::Deserialize;

use super::CatalogError;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Single-result YouTube Data API lookup: "best video for this query",
/// nothing more.
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: VideoRef,
}

#[derive(Deserialize)]
struct VideoRef {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl YouTubeClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        YouTubeClient { http, api_key }
    }

    pub async fn find_video_id(&self, query: &str) -> Result<Option<String>, CatalogError> {
        let resp = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }

        let body: SearchListResponse = resp.json().await?;
        Ok(body.items.into_iter().next().and_then(|item| item.id.video_id))
    }
}
