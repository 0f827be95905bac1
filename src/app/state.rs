use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::mood::Mood;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveScreen {
    #[default]
    Home,
    Search,
    Library,
    Queue,
}

/// Home screen: a grid of mood blocks, then the tracks inside one.
#[derive(Debug, Clone, Default)]
pub struct HomeUi {
    pub selected_block: usize,
    pub selected_track: usize,
    pub in_tracks: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchUi {
    pub query: String,
    pub input_active: bool,
    pub selected: usize,
    pub in_flight: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryUi {
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QueueUi {
    pub selected: usize,
}

/// The weather/time banner that explains today's suggested mood.
#[derive(Debug, Clone)]
pub struct MoodBanner {
    pub mood: Mood,
    pub summary: String,
    pub city: String,
    pub time_label: &'static str,
}

impl Default for MoodBanner {
    fn default() -> Self {
        MoodBanner {
            mood: Mood::Chill,
            summary: "checking the sky...".to_string(),
            city: String::new(),
            time_label: "",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u8,
    pub is_error: bool,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Notification {
            message: msg.into(),
            remaining_ticks: 30,
            is_error: false,
        }
    }
    pub fn error(msg: impl Into<String>) -> Self {
        Notification {
            message: msg.into(),
            remaining_ticks: 40,
            is_error: true,
        }
    }
}

#[derive(Default)]
pub struct AppState {
    pub active_screen: ActiveScreen,
    pub previous_screen: Option<ActiveScreen>,
    pub home: HomeUi,
    pub search: SearchUi,
    pub library: LibraryUi,
    pub queue: QueueUi,
    pub banner: MoodBanner,
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: u64,
    pub pulse: [u8; 16],
    pub ticker_offset: usize,
}

impl AppState {
    pub fn navigate_to(&mut self, screen: ActiveScreen) {
        if self.active_screen != screen {
            self.previous_screen = Some(self.active_screen.clone());
            self.active_screen = screen;
        }
    }

    pub fn set_notification(&mut self, n: Notification) {
        self.notification = Some(n);
    }

    pub fn tick_notification(&mut self) {
        if let Some(ref mut n) = self.notification {
            if n.remaining_ticks > 0 {
                n.remaining_ticks -= 1;
            } else {
                self.notification = None;
            }
        }
    }

    /// Moon-pulse animation in the player bar: bars drift while playing,
    /// sink back to rest while paused.
    pub fn tick_pulse(&mut self, playing: bool) {
        use rand::Rng;
        self.tick += 1;
        let mut rng = rand::thread_rng();
        if playing {
            for bar in self.pulse.iter_mut() {
                let delta: i8 = rng.gen_range(-2..=2);
                *bar = (*bar as i8 + delta).clamp(1, 8) as u8;
            }
        } else {
            for bar in self.pulse.iter_mut() {
                *bar = bar.saturating_sub(1).max(1);
            }
        }
    }

    pub fn tick_ticker(&mut self, title_chars: usize) {
        if self.tick % 5 == 0 && title_chars > 0 {
            self.ticker_offset = (self.ticker_offset + 1) % title_chars;
        }
    }

    /// Marquee a long title into `max_width` display columns; short titles
    /// pass through untouched.
    pub fn marquee_title(&self, title: &str, max_width: usize) -> String {
        if UnicodeWidthStr::width(title) <= max_width {
            return title.to_string();
        }
        let padded = format!("{title}   ");
        let chars: Vec<char> = padded.chars().collect();
        let offset = self.ticker_offset % chars.len();
        let mut out = String::new();
        let mut width = 0;
        for &c in chars[offset..].iter().chain(chars[..offset].iter()) {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if width + w > max_width {
                break;
            }
            width += w;
            out.push(c);
        }
        out
    }
}
