use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub youtube_api_key: String,
    /// Weather is optional; without a key the mood engine runs on the
    /// time of day alone.
    pub openweather_api_key: Option<String>,
    pub city: String,
    pub queue_wrap: bool,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // .env is a convenience; plain env vars work too

        Ok(Config {
            spotify_client_id: std::env::var("SPOTIFY_CLIENT_ID")
                .context("SPOTIFY_CLIENT_ID is missing from .env or environment")?,
            spotify_client_secret: std::env::var("SPOTIFY_CLIENT_SECRET")
                .context("SPOTIFY_CLIENT_SECRET is missing from .env or environment")?,
            youtube_api_key: std::env::var("YOUTUBE_API_KEY")
                .context("YOUTUBE_API_KEY is missing from .env or environment")?,
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
            city: std::env::var("LUNA_CITY").unwrap_or_else(|_| "London".to_string()),
            queue_wrap: std::env::var("LUNA_QUEUE_WRAP")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            data_dir: std::env::var("LUNA_DATA_DIR").ok().map(PathBuf::from),
        })
    }
}
