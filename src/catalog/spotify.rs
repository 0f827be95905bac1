use base64::Engine;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use super::{CatalogError, RawTrack, Track};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_URL: &str = "https://api.spotify.com/v1";

// Refresh slightly before Spotify says the token dies, so an in-flight
// request never races the expiry.
const EXPIRY_MARGIN_SECS: u64 = 30;

/// Spotify Web API client using the client-credentials grant. The access
/// token is memoized with its expiry and refetched lazily; no user login
/// is involved anywhere.
pub struct SpotifyClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<RawTrack>,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, client_id: String, client_secret: String) -> Self {
        SpotifyClient {
            http,
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut guard = self.token.lock().await;
        if let Some(ref cached) = *guard {
            if Instant::now() < cached.expires_at {
                return Ok(cached.value.clone());
            }
        }

        let basic = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));
        let resp = self
            .http
            .post(TOKEN_URL)
            .header(AUTHORIZATION, format!("Basic {basic}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Auth(resp.status().to_string()));
        }

        let body: TokenResponse = resp.json().await?;
        let ttl = body.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        debug!("spotify token refreshed, valid for {ttl}s");
        *guard = Some(CachedToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        });
        Ok(body.access_token)
    }

    /// Track search; mood lookups go through here too with a canned query.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        let token = self.access_token().await?;
        let limit = limit.to_string();
        let resp = self
            .http
            .get(format!("{API_URL}/search"))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }

        let body: SearchResponse = resp.json().await?;
        Ok(body.tracks.items.into_iter().map(Track::from_raw).collect())
    }
}
