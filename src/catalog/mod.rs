use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::mood::Mood;

pub mod spotify;
pub mod youtube;

use self::spotify::SpotifyClient;
use self::youtube::YouTubeClient;

/// Tracks returned per search/mood request, matching the Spotify page size
/// the backend asks for.
pub const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token request rejected: {0}")]
    Auth(String),
    #[error("api returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Canonical track record. Everything past the catalog boundary sees this
/// shape and nothing else — alias shapes from the wire are folded away in
/// [`Track::from_raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub liked: bool,
}

impl Track {
    /// Normalize a raw wire-shaped track into the canonical record.
    ///
    /// Sources disagree on field names (`title` vs `name`, a single artist
    /// string vs an artist list), so each field falls back through its
    /// aliases and bottoms out at a safe default. A missing id gets a
    /// synthesized one so set-membership by id stays well defined.
    pub fn from_raw(raw: RawTrack) -> Track {
        let title = raw
            .title
            .or(raw.name)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown title".to_string());

        let artist = match raw.artist {
            Some(a) if !a.is_empty() => a,
            _ => {
                let joined = raw
                    .artists
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| a.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                if joined.is_empty() {
                    "Unknown artist".to_string()
                } else {
                    joined
                }
            }
        };

        let (album, cover_url) = match raw.album {
            Some(album) => {
                let cover = album
                    .images
                    .into_iter()
                    .next()
                    .map(|i| i.url)
                    .unwrap_or_default();
                (album.name, cover)
            }
            None => (String::new(), String::new()),
        };

        Track {
            id: raw.id.unwrap_or_else(synthesize_id),
            title,
            artist,
            album,
            cover_url,
            duration_secs: (raw.duration_ms.unwrap_or(0) / 1000) as u32,
            video_id: None,
            liked: false,
        }
    }

    pub fn duration_formatted(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}

fn synthesize_id() -> String {
    format!("local-{:08x}", rand::random::<u32>())
}

/// Track as it may arrive off the wire, with every alias shape optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    pub id: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub artists: Option<Vec<RawArtist>>,
    pub album: Option<RawAlbum>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub url: String,
}

/// The remote-lookup capability the store and app consume. Implementations
/// fail closed: transport and auth problems surface as empty results, never
/// as errors the view layer has to handle.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_tracks(&self, query: &str) -> Vec<Track>;
    async fn mood_tracks(&self, mood: Mood) -> Vec<Track>;
    async fn lookup_video_id(&self, query: &str) -> Option<String>;
}

/// Live catalog backed by the Spotify Web API and the YouTube Data API.
pub struct HttpCatalog {
    spotify: SpotifyClient,
    youtube: YouTubeClient,
}

impl HttpCatalog {
    pub fn new(spotify: SpotifyClient, youtube: YouTubeClient) -> Self {
        HttpCatalog { spotify, youtube }
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_tracks(&self, query: &str) -> Vec<Track> {
        if query.trim().is_empty() {
            return vec![];
        }
        match self.spotify.search(query, SEARCH_LIMIT).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("spotify search failed: {e}");
                vec![]
            }
        }
    }

    async fn mood_tracks(&self, mood: Mood) -> Vec<Track> {
        match self.spotify.search(mood.query(), SEARCH_LIMIT).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("mood lookup failed for {mood}: {e}");
                vec![]
            }
        }
    }

    async fn lookup_video_id(&self, query: &str) -> Option<String> {
        match self.youtube.find_video_id(query).await {
            Ok(id) => id,
            Err(e) => {
                warn!("video lookup failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_spotify_shape() {
        let raw: RawTrack = serde_json::from_str(
            r#"{
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Never Gonna Give You Up",
                "artists": [{"name": "Rick Astley"}],
                "album": {"name": "Whenever You Need Somebody",
                          "images": [{"url": "https://img/640.jpg"}, {"url": "https://img/300.jpg"}]},
                "duration_ms": 213573
            }"#,
        )
        .unwrap();
        let track = Track::from_raw(raw);
        assert_eq!(track.id, "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(track.title, "Never Gonna Give You Up");
        assert_eq!(track.artist, "Rick Astley");
        assert_eq!(track.cover_url, "https://img/640.jpg");
        assert_eq!(track.duration_secs, 213);
        assert!(!track.liked);
    }

    #[test]
    fn normalize_flat_shape() {
        let raw: RawTrack = serde_json::from_str(
            r#"{"id": "5", "title": "X", "artist": "Y", "duration_ms": 61000}"#,
        )
        .unwrap();
        let track = Track::from_raw(raw);
        assert_eq!(track.title, "X");
        assert_eq!(track.artist, "Y");
        assert_eq!(track.album, "");
        assert_eq!(track.duration_secs, 61);
    }

    #[test]
    fn normalize_joins_multiple_artists() {
        let raw = RawTrack {
            id: Some("t".into()),
            name: Some("Duet".into()),
            artists: Some(vec![
                RawArtist { name: "A".into() },
                RawArtist { name: "B".into() },
            ]),
            ..Default::default()
        };
        assert_eq!(Track::from_raw(raw).artist, "A, B");
    }

    #[test]
    fn normalize_fallbacks_for_missing_fields() {
        let track = Track::from_raw(RawTrack::default());
        assert_eq!(track.title, "Unknown title");
        assert_eq!(track.artist, "Unknown artist");
        assert_eq!(track.cover_url, "");
        assert_eq!(track.duration_secs, 0);
        assert!(track.id.starts_with("local-"), "missing id must be synthesized");
    }

    #[test]
    fn synthesized_ids_are_distinct() {
        let a = Track::from_raw(RawTrack::default());
        let b = Track::from_raw(RawTrack::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duration_formatting() {
        let mut track = Track::from_raw(RawTrack::default());
        track.duration_secs = 213;
        assert_eq!(track.duration_formatted(), "3:33");
        track.duration_secs = 59;
        assert_eq!(track.duration_formatted(), "0:59");
    }
}
