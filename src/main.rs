mod app;
mod catalog;
mod config;
mod events;
mod mood;
mod storage;
mod store;
mod ui;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    app::App,
    catalog::{spotify::SpotifyClient, youtube::YouTubeClient, HttpCatalog},
    config::Config,
    storage::Storage,
    store::{MusicStore, QueuePolicy},
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("luna=info"));
    // Logs go to a file so they don't corrupt the TUI
    let log_path = std::env::temp_dir().join("luna.log");
    if let Ok(file) = std::fs::File::create(&log_path) {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }

    // ── Config, storage, store, catalog ──────────────────────────────────────
    let config = Config::load()?;
    let storage = Storage::new(config.data_dir.clone())?;
    let store = MusicStore::new(storage, QueuePolicy { wrap: config.queue_wrap });

    let http = reqwest::Client::new();
    let spotify = SpotifyClient::new(
        http.clone(),
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    );
    let youtube = YouTubeClient::new(http, config.youtube_api_key.clone());
    let catalog = Arc::new(HttpCatalog::new(spotify, youtube));

    // ── Terminal setup ────────────────────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // ── Panic hook to restore terminal on crash ──────────────────────────────
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        original_hook(panic_info);
    }));

    // ── Run the app ──────────────────────────────────────────────────────────
    let result = {
        let mut app = App::new(&config, store, catalog);
        app.run(&mut terminal).await
    };

    // ── Restore terminal ─────────────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("App error: {e:?}");
        eprintln!("\n\x1b[31mluna crashed:\x1b[0m {e}");
        eprintln!("Check {} for details", log_path.display());
    }

    Ok(())
}
