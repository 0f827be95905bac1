pub mod state;

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time};
use tracing::{debug, info, warn};

use crate::{
    app::state::{ActiveScreen, AppState, Notification},
    catalog::{Catalog, Track},
    config::Config,
    events::{map_key_to_action, UserAction},
    mood::{self, weather::WeatherClient, Mood},
    store::{Direction, LookupOutcome, MoodBlock, MusicStore},
};

const TICK_MS: u64 = 80; // UI tick: animations, ticker, toast decay

const SEEK_STEP_SECS: u32 = 10;

/// Results of background work, fed back into the event loop.
pub enum AppEvent {
    SearchLoaded(Vec<Track>),
    MoodBlocksLoaded(Vec<MoodBlock>),
    WeatherLoaded(mood::weather::WeatherReport),
    VideoResolved {
        track_id: String,
        video_id: Option<String>,
    },
}

pub struct App {
    pub state: AppState,
    pub store: MusicStore,
    catalog: Arc<dyn Catalog>,
    weather: Option<(String, String)>, // (api key, city)
    tx: mpsc::Sender<AppEvent>,
    rx: Option<mpsc::Receiver<AppEvent>>,
}

impl App {
    pub fn new(config: &Config, store: MusicStore, catalog: Arc<dyn Catalog>) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let weather = config
            .openweather_api_key
            .clone()
            .map(|key| (key, config.city.clone()));
        App {
            state: AppState::default(),
            store,
            catalog,
            weather,
            tx,
            rx: Some(rx),
        }
    }

    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let mut rx = self.rx.take().context("app can only be run once")?;

        // Until (and unless) weather arrives, the clock alone picks the mood.
        let hour = Local::now().hour();
        self.state.banner.mood = mood::mood_for("", hour);
        self.state.banner.time_label = mood::time_label(hour);

        self.spawn_mood_blocks();
        self.spawn_weather();
        info!("luna started");

        let mut tick_interval = time::interval(Duration::from_millis(TICK_MS));
        let mut second_interval = time::interval(Duration::from_secs(1));
        let mut event_stream = EventStream::new();

        loop {
            terminal.draw(|f| crate::ui::render(f, &self.state, &self.store))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    let playing = self.store.is_playing();
                    let title_chars = self
                        .store
                        .current()
                        .map(|t| t.title.chars().count() + 3)
                        .unwrap_or(0);
                    self.state.tick_pulse(playing);
                    self.state.tick_ticker(title_chars);
                    self.state.tick_notification();
                }
                _ = second_interval.tick() => {
                    if self.store.tick_progress() {
                        self.auto_advance();
                    }
                }
                Some(event) = rx.recv() => {
                    self.handle_event(event);
                }
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        let search_active = self.state.search.input_active;
                        if let Some(action) = map_key_to_action(key, search_active) {
                            self.handle_action(action);
                        }
                    }
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    // ── Background results ────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchLoaded(tracks) => {
                self.state.search.in_flight = false;
                self.state.search.selected = 0;
                let n = tracks.len();
                self.store.set_search_results(tracks);
                let note = if n == 0 {
                    Notification::info("No results found")
                } else {
                    Notification::info(format!("Found {n} tracks"))
                };
                self.state.set_notification(note);
            }
            AppEvent::MoodBlocksLoaded(blocks) => {
                self.store.set_mood_blocks(blocks);
                self.store.set_loading(false);
                // A refresh can shrink or empty the block under the cursor
                // (the catalog fails closed); pull the selection back inside.
                let max_block = self.store.mood_blocks().len().saturating_sub(1);
                self.state.home.selected_block = self.state.home.selected_block.min(max_block);
                let tracks_len = self.selected_block().map_or(0, |b| b.tracks.len());
                if tracks_len == 0 {
                    self.state.home.in_tracks = false;
                    self.state.home.selected_track = 0;
                } else {
                    self.state.home.selected_track =
                        self.state.home.selected_track.min(tracks_len - 1);
                }
            }
            AppEvent::WeatherLoaded(report) => {
                let hour = Local::now().hour();
                let derived = mood::mood_for(&report.main, hour);
                self.state.banner.mood = derived;
                self.state.banner.summary = report.description;
                self.state.banner.city = report.city;
                self.state.banner.time_label = mood::time_label(hour);
                debug!("weather mood: {derived}");
            }
            AppEvent::VideoResolved { track_id, video_id } => {
                match self.store.apply_video_lookup(&track_id, video_id) {
                    LookupOutcome::Resolved => {
                        let title = self
                            .store
                            .current()
                            .map(|t| t.title.clone())
                            .unwrap_or_default();
                        if let Some(vid) = self.store.cached_video_id(&track_id).map(str::to_string)
                        {
                            self.state
                                .set_notification(Notification::info(format!("Playing: {title}")));
                            self.open_video(&vid);
                        }
                    }
                    LookupOutcome::NotFound => {
                        self.store.pause();
                        self.state
                            .set_notification(Notification::error("No playable video found"));
                    }
                    LookupOutcome::Stale => {
                        debug!("ignored stale video result for {track_id}");
                    }
                }
            }
        }
    }

    // ── User actions ──────────────────────────────────────────────────────

    fn handle_action(&mut self, action: UserAction) {
        match action {
            UserAction::Quit => self.state.should_quit = true,
            UserAction::ToggleHelp => self.state.show_help = !self.state.show_help,
            UserAction::SwitchScreen(n) => {
                self.state.show_help = false;
                match n {
                    1 => self.state.navigate_to(ActiveScreen::Home),
                    2 => {
                        self.state.navigate_to(ActiveScreen::Search);
                        self.state.search.input_active = false;
                    }
                    3 => self.state.navigate_to(ActiveScreen::Library),
                    4 => {
                        self.state.navigate_to(ActiveScreen::Queue);
                        self.state.queue.selected = self.store.position();
                    }
                    _ => {}
                }
            }
            UserAction::OpenSearch => {
                self.state.navigate_to(ActiveScreen::Search);
                self.state.search.input_active = true;
            }
            UserAction::Back => {
                if self.state.search.input_active {
                    self.state.search.input_active = false;
                } else if self.state.home.in_tracks {
                    self.state.home.in_tracks = false;
                } else if self.state.show_help {
                    self.state.show_help = false;
                }
            }
            UserAction::SearchInput(c) => self.state.search.query.push(c),
            UserAction::SearchBackspace => {
                self.state.search.query.pop();
            }
            UserAction::SearchSubmit => {
                self.state.search.input_active = false;
                if !self.state.search.query.trim().is_empty() {
                    self.spawn_search();
                }
            }
            UserAction::NavigateUp => self.navigate_up(),
            UserAction::NavigateDown => self.navigate_down(),
            UserAction::NavigateLeft => {
                if self.state.active_screen == ActiveScreen::Home && self.state.home.in_tracks {
                    self.state.home.in_tracks = false;
                }
            }
            UserAction::NavigateRight => {
                if self.state.active_screen == ActiveScreen::Home && !self.state.home.in_tracks {
                    self.enter_mood_block();
                }
            }
            UserAction::Select => self.handle_select(),
            UserAction::TogglePlay => {
                self.store.toggle_play_pause();
                if self.store.current().is_some() {
                    let msg = if self.store.is_playing() { "Resumed" } else { "Paused" };
                    self.state.set_notification(Notification::info(msg));
                }
            }
            UserAction::NextTrack => {
                if self.store.advance(Direction::Next) {
                    self.start_playback_for_current();
                } else {
                    self.state.set_notification(Notification::info("End of queue"));
                }
            }
            UserAction::PrevTrack => {
                if self.store.advance(Direction::Previous) {
                    self.start_playback_for_current();
                } else {
                    self.state
                        .set_notification(Notification::info("Start of queue"));
                }
            }
            UserAction::LikeTrack => self.handle_like(),
            UserAction::SeekForward => {
                let pos = self.store.progress_secs() + SEEK_STEP_SECS;
                self.store.set_progress(pos);
            }
            UserAction::SeekBackward => {
                let pos = self.store.progress_secs().saturating_sub(SEEK_STEP_SECS);
                self.store.set_progress(pos);
            }
            UserAction::RefreshMoods => {
                self.spawn_mood_blocks();
                self.state
                    .set_notification(Notification::info("Refreshing mood blocks..."));
            }
        }
    }

    fn navigate_up(&mut self) {
        match self.state.active_screen {
            ActiveScreen::Home => {
                if self.state.home.in_tracks {
                    self.state.home.selected_track =
                        self.state.home.selected_track.saturating_sub(1);
                } else {
                    self.state.home.selected_block =
                        self.state.home.selected_block.saturating_sub(1);
                }
            }
            ActiveScreen::Search => {
                self.state.search.selected = self.state.search.selected.saturating_sub(1);
            }
            ActiveScreen::Library => {
                self.state.library.selected = self.state.library.selected.saturating_sub(1);
            }
            ActiveScreen::Queue => {
                self.state.queue.selected = self.state.queue.selected.saturating_sub(1);
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.state.active_screen {
            ActiveScreen::Home => {
                if self.state.home.in_tracks {
                    let max = self
                        .selected_block()
                        .map(|b| b.tracks.len().saturating_sub(1))
                        .unwrap_or(0);
                    if self.state.home.selected_track < max {
                        self.state.home.selected_track += 1;
                    }
                } else {
                    let max = self.store.mood_blocks().len().saturating_sub(1);
                    if self.state.home.selected_block < max {
                        self.state.home.selected_block += 1;
                    }
                }
            }
            ActiveScreen::Search => {
                let max = self.store.search_results().len().saturating_sub(1);
                if self.state.search.selected < max {
                    self.state.search.selected += 1;
                }
            }
            ActiveScreen::Library => {
                let max = self.store.favorites().len().saturating_sub(1);
                if self.state.library.selected < max {
                    self.state.library.selected += 1;
                }
            }
            ActiveScreen::Queue => {
                let max = self.store.queue().len().saturating_sub(1);
                if self.state.queue.selected < max {
                    self.state.queue.selected += 1;
                }
            }
        }
    }

    fn selected_block(&self) -> Option<&MoodBlock> {
        self.store.mood_blocks().get(self.state.home.selected_block)
    }

    fn enter_mood_block(&mut self) {
        if self.selected_block().is_some_and(|b| !b.tracks.is_empty()) {
            self.state.home.in_tracks = true;
            self.state.home.selected_track = 0;
        }
    }

    fn handle_select(&mut self) {
        match self.state.active_screen {
            ActiveScreen::Home => {
                if !self.state.home.in_tracks {
                    self.enter_mood_block();
                } else if let Some(block) = self.selected_block().filter(|b| !b.tracks.is_empty()) {
                    let index = self.state.home.selected_track.min(block.tracks.len() - 1);
                    let queue = block.tracks.clone();
                    self.play_from_list(queue, index);
                }
            }
            ActiveScreen::Search => {
                let results = self.store.search_results().to_vec();
                if !results.is_empty() {
                    let index = self.state.search.selected.min(results.len() - 1);
                    self.play_from_list(results, index);
                }
            }
            ActiveScreen::Library => {
                let favorites = self.store.favorites().to_vec();
                if !favorites.is_empty() {
                    let index = self.state.library.selected.min(favorites.len() - 1);
                    self.play_from_list(favorites, index);
                }
            }
            ActiveScreen::Queue => {
                let queue = self.store.queue().to_vec();
                if !queue.is_empty() {
                    let index = self.state.queue.selected.min(queue.len() - 1);
                    self.play_from_list(queue, index);
                }
            }
        }
    }

    fn handle_like(&mut self) {
        let target = match self.state.active_screen {
            ActiveScreen::Home if self.state.home.in_tracks => self
                .selected_block()
                .and_then(|b| b.tracks.get(self.state.home.selected_track))
                .cloned(),
            ActiveScreen::Search => self
                .store
                .search_results()
                .get(self.state.search.selected)
                .cloned(),
            ActiveScreen::Library => self
                .store
                .favorites()
                .get(self.state.library.selected)
                .cloned(),
            ActiveScreen::Queue => self.store.queue().get(self.state.queue.selected).cloned(),
            _ => self.store.current().cloned(),
        };
        let Some(track) = target else { return };

        let liked = self.store.toggle_favorite(&track);
        let msg = if liked {
            format!("❤ Added to favorites: {}", track.title)
        } else {
            format!("Removed from favorites: {}", track.title)
        };
        self.state.set_notification(Notification::info(msg));

        // The library may have shrunk underneath the cursor.
        let max = self.store.favorites().len().saturating_sub(1);
        self.state.library.selected = self.state.library.selected.min(max);
    }

    // ── Playback ──────────────────────────────────────────────────────────

    fn play_from_list(&mut self, queue: Vec<Track>, index: usize) {
        let track = queue[index].clone();
        self.store.set_current_track(track, Some((queue, index)));
        self.start_playback_for_current();
    }

    fn auto_advance(&mut self) {
        if self.store.advance(Direction::Next) {
            self.start_playback_for_current();
        } else {
            self.store.pause();
        }
    }

    /// Cached video id starts playback immediately; otherwise a lookup is
    /// spawned, tagged with the track id so a late result for a track the
    /// user has moved past gets dropped by the store.
    fn start_playback_for_current(&mut self) {
        let Some(track) = self.store.current().cloned() else {
            return;
        };
        if let Some(vid) = self.store.cached_video_id(&track.id).map(str::to_string) {
            self.state
                .set_notification(Notification::info(format!("Playing: {}", track.title)));
            self.open_video(&vid);
        } else if let Some(query) = self.store.needs_video_lookup(&track) {
            let catalog = self.catalog.clone();
            let tx = self.tx.clone();
            let track_id = track.id.clone();
            tokio::spawn(async move {
                let video_id = catalog.lookup_video_id(&query).await;
                let _ = tx.send(AppEvent::VideoResolved { track_id, video_id }).await;
            });
        }
    }

    /// Actual audio comes from the resolved video, handed to the OS
    /// default handler; luna only tracks progress and queue position.
    fn open_video(&mut self, video_id: &str) {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        if let Err(e) = open::that(&url) {
            warn!("could not hand off playback: {e}");
            self.state
                .set_notification(Notification::error("Could not open the video player"));
        }
    }

    // ── Background fetches ────────────────────────────────────────────────

    fn spawn_search(&mut self) {
        let query = self.state.search.query.clone();
        self.state.search.in_flight = true;
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let tracks = catalog.search_tracks(&query).await;
            let _ = tx.send(AppEvent::SearchLoaded(tracks)).await;
        });
    }

    fn spawn_mood_blocks(&mut self) {
        self.store.set_loading(true);
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let fetches = Mood::home_blocks().map(|mood| {
                let catalog = catalog.clone();
                async move {
                    MoodBlock {
                        mood,
                        title: mood.key().to_uppercase(),
                        tracks: catalog.mood_tracks(mood).await,
                    }
                }
            });
            let blocks = futures::future::join_all(fetches).await;
            let _ = tx.send(AppEvent::MoodBlocksLoaded(blocks)).await;
        });
    }

    fn spawn_weather(&mut self) {
        let Some((api_key, city)) = self.weather.clone() else {
            debug!("no weather key configured, staying on the time-of-day mood");
            return;
        };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let client = WeatherClient::new(reqwest::Client::new(), api_key, city);
            match client.current().await {
                Ok(report) => {
                    let _ = tx.send(AppEvent::WeatherLoaded(report)).await;
                }
                Err(e) => warn!("weather fetch failed: {e}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawTrack;
    use crate::storage::Storage;
    use crate::store::QueuePolicy;

    struct SilentCatalog;

    #[async_trait::async_trait]
    impl Catalog for SilentCatalog {
        async fn search_tracks(&self, _query: &str) -> Vec<Track> {
            vec![]
        }
        async fn mood_tracks(&self, _mood: Mood) -> Vec<Track> {
            vec![]
        }
        async fn lookup_video_id(&self, _query: &str) -> Option<String> {
            None
        }
    }

    fn test_app(tag: &str) -> App {
        let dir =
            std::env::temp_dir().join(format!("luna-app-{tag}-{:08x}", rand::random::<u32>()));
        let store = MusicStore::new(Storage::new(Some(dir)).unwrap(), QueuePolicy::default());
        let config = Config {
            spotify_client_id: "id".to_string(),
            spotify_client_secret: "secret".to_string(),
            youtube_api_key: "key".to_string(),
            openweather_api_key: None,
            city: "London".to_string(),
            queue_wrap: false,
            data_dir: None,
        };
        App::new(&config, store, Arc::new(SilentCatalog))
    }

    fn track(id: &str) -> Track {
        let mut t = Track::from_raw(RawTrack::default());
        t.id = id.to_string();
        t.title = format!("Track {id}");
        t.artist = "Artist".to_string();
        t.duration_secs = 180;
        t
    }

    fn block(tracks: Vec<Track>) -> MoodBlock {
        MoodBlock {
            mood: Mood::Chill,
            title: "CHILL".to_string(),
            tracks,
        }
    }

    #[tokio::test]
    async fn mood_refresh_to_empty_pulls_cursor_out_of_tracks() {
        let mut app = test_app("refresh-empty");
        app.handle_event(AppEvent::MoodBlocksLoaded(vec![block(vec![
            track("1"),
            track("2"),
        ])]));
        app.handle_action(UserAction::Select);
        assert!(app.state.home.in_tracks);

        // Refresh comes back with the block emptied (catalog fails closed).
        app.handle_event(AppEvent::MoodBlocksLoaded(vec![block(vec![])]));
        assert!(!app.state.home.in_tracks);
        assert_eq!(app.state.home.selected_track, 0);

        // Selecting again must not touch playback.
        app.handle_action(UserAction::Select);
        assert!(app.store.current().is_none());
    }

    #[tokio::test]
    async fn select_inside_an_empty_mood_block_is_ignored() {
        let mut app = test_app("empty-block");
        app.handle_event(AppEvent::MoodBlocksLoaded(vec![block(vec![])]));
        // Pin the track view open even though the block has nothing in it.
        app.state.home.in_tracks = true;
        app.state.home.selected_track = 3;

        app.handle_action(UserAction::Select);
        assert!(app.store.current().is_none());
        assert!(app.store.queue().is_empty());
    }

    #[tokio::test]
    async fn mood_refresh_clamps_track_cursor_to_shrunk_block() {
        let mut app = test_app("refresh-shrunk");
        app.handle_event(AppEvent::MoodBlocksLoaded(vec![block(vec![
            track("1"),
            track("2"),
            track("3"),
        ])]));
        app.handle_action(UserAction::Select);
        app.state.home.selected_track = 2;

        app.handle_event(AppEvent::MoodBlocksLoaded(vec![block(vec![track("1")])]));
        assert!(app.state.home.in_tracks);
        assert_eq!(app.state.home.selected_track, 0);
    }
}
