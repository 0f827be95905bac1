use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::catalog::Track;

const RECORD_VERSION: u32 = 1;

const FAVORITES_FILE: &str = "favorites.json";
const LAST_PLAYED_FILE: &str = "last_played.json";
const VIDEO_IDS_FILE: &str = "video_ids.json";
const POSITION_FILE: &str = "position.json";

/// Local-device persistence: one versioned JSON record per concern, under
/// the OS data directory. Loads degrade to defaults and saves swallow their
/// errors — losing a cache file must never take the app down.
pub struct Storage {
    dir: PathBuf,
}

#[derive(Serialize)]
struct RecordOut<'a, T: Serialize> {
    version: u32,
    saved_at: DateTime<Utc>,
    data: &'a T,
}

#[derive(Deserialize)]
struct RecordIn<T> {
    version: u32,
    data: T,
}

impl Storage {
    /// `dir` overrides the default location (used by tests and the
    /// `LUNA_DATA_DIR` setting).
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(d) => d,
            None => dirs::data_dir()
                .context("could not determine the OS data directory")?
                .join("luna"),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("could not create data dir {}", dir.display()))?;
        Ok(Storage { dir })
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<RecordIn<T>>(&raw) {
            Ok(rec) if rec.version == RECORD_VERSION => Some(rec.data),
            Ok(rec) => {
                warn!("{file}: record version {} unknown, ignoring", rec.version);
                None
            }
            Err(e) => {
                warn!("{file}: unreadable record, ignoring: {e}");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, file: &str, data: &T) {
        let record = RecordOut {
            version: RECORD_VERSION,
            saved_at: Utc::now(),
            data,
        };
        let json = match serde_json::to_string_pretty(&record) {
            Ok(json) => json,
            Err(e) => {
                warn!("{file}: could not serialize record: {e}");
                return;
            }
        };
        // Write-then-rename keeps the record whole even if we die mid-save.
        let tmp = self.dir.join(format!("{file}.tmp"));
        let path = self.dir.join(file);
        if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &path)) {
            warn!("{file}: save failed: {e}");
        }
    }

    pub fn load_favorites(&self) -> Vec<Track> {
        self.read(FAVORITES_FILE).unwrap_or_default()
    }

    pub fn save_favorites(&self, favorites: &[Track]) {
        self.write(FAVORITES_FILE, &favorites);
    }

    pub fn load_last_played(&self) -> Option<Track> {
        self.read(LAST_PLAYED_FILE)
    }

    pub fn save_last_played(&self, track: &Track) {
        self.write(LAST_PLAYED_FILE, track);
    }

    pub fn load_video_ids(&self) -> HashMap<String, String> {
        self.read(VIDEO_IDS_FILE).unwrap_or_default()
    }

    pub fn save_video_ids(&self, ids: &HashMap<String, String>) {
        self.write(VIDEO_IDS_FILE, ids);
    }

    pub fn load_position(&self) -> u32 {
        self.read(POSITION_FILE).unwrap_or(0)
    }

    pub fn save_position(&self, secs: u32) {
        self.write(POSITION_FILE, &secs);
    }
}
