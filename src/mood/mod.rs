use serde::{Deserialize, Serialize};

pub mod weather;

/// The mood vocabulary. Covers the home-page blocks plus everything the
/// weather engine can emit, so a derived mood always has a search query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum Mood {
    #[strum(to_string = "🌊 Chill")]
    Chill,
    #[strum(to_string = "✨ Happy")]
    Happy,
    #[strum(to_string = "🌧 Sad")]
    Sad,
    #[strum(to_string = "🎯 Focus")]
    Focus,
    #[strum(to_string = "⚡ Energetic")]
    Energetic,
    #[strum(to_string = "🌅 Relax")]
    Relax,
    #[strum(to_string = "🌑 Dark")]
    Dark,
}

impl Mood {
    pub fn key(&self) -> &'static str {
        match self {
            Mood::Chill => "chill",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Focus => "focus",
            Mood::Energetic => "energetic",
            Mood::Relax => "relax",
            Mood::Dark => "dark",
        }
    }

    /// Spotify search query standing in for the deprecated recommendations
    /// API: mood keywords tuned by ear, not science.
    pub fn query(&self) -> &'static str {
        match self {
            Mood::Chill => "chill vibe lo-fi",
            Mood::Happy => "happy upbeat feel good",
            Mood::Sad => "sad acoustic",
            Mood::Focus => "lofi focus study",
            Mood::Energetic => "edm hype energy",
            Mood::Relax => "relaxing evening acoustic",
            Mood::Dark => "dark heavy intense",
        }
    }

    /// The four blocks shown on the home screen.
    pub fn home_blocks() -> [Mood; 4] {
        [Mood::Chill, Mood::Happy, Mood::Sad, Mood::Focus]
    }
}

/// Derive a mood from current weather conditions and the hour of day.
///
/// Time of day sets the baseline; certain weather overrides it outright.
/// `weather_main` is the OpenWeather condition group ("Rain", "Clear", ...).
pub fn mood_for(weather_main: &str, hour: u32) -> Mood {
    let time_mood = match hour {
        5..=10 => Mood::Energetic,
        11..=16 => Mood::Happy,
        17..=20 => Mood::Relax,
        _ => Mood::Chill,
    };

    match weather_main {
        "Rain" | "Drizzle" | "Mist" => Mood::Chill,
        "Thunderstorm" => Mood::Dark,
        "Clear" if time_mood == Mood::Energetic => Mood::Energetic,
        _ => time_mood,
    }
}

/// Greeting label for the banner, from the hour of day.
pub fn time_label(hour: u32) -> &'static str {
    match hour {
        5..=10 => "morning",
        11..=16 => "afternoon",
        17..=20 => "evening",
        _ => "late night",
    }
}
