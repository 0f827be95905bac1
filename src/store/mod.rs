use std::collections::HashMap;
use tracing::debug;

use crate::catalog::Track;
use crate::mood::Mood;
use crate::storage::Storage;

/// A mood's worth of suggested tracks for the home screen.
#[derive(Debug, Clone)]
pub struct MoodBlock {
    pub mood: Mood,
    pub title: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// What `advance` does at the ends of the queue. Non-wrapping by default:
/// stepping past either end leaves the store untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueuePolicy {
    pub wrap: bool,
}

/// Result of feeding a finished video lookup back into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The id was cached and playback may start.
    Resolved,
    /// The lookup found nothing; the track stays unplayable this session.
    NotFound,
    /// The user navigated away while the lookup was in flight; the result
    /// was discarded without touching any state.
    Stale,
}

/// Single source of truth for what is playing, what's next, and what's
/// liked. Owned by the event loop and handed by reference to every
/// consumer; all mutations are synchronous, so no operation can observe
/// another's intermediate state.
///
/// Invariant, held after every operation: whenever the queue is non-empty,
/// `current.id == queue[position].id`.
pub struct MusicStore {
    storage: Storage,
    policy: QueuePolicy,

    current: Option<Track>,
    queue: Vec<Track>,
    position: usize,
    is_playing: bool,
    progress_secs: u32,

    favorites: Vec<Track>,
    video_ids: HashMap<String, String>,

    search_results: Vec<Track>,
    mood_blocks: Vec<MoodBlock>,
    is_loading: bool,

    /// Track id of the in-flight video lookup, if any. A finished lookup
    /// for any other id is stale and gets dropped.
    pending_lookup: Option<String>,
}

/// The query handed to the video lookup for a track.
pub fn lookup_query(track: &Track) -> String {
    format!("{} {}", track.title, track.artist).trim().to_string()
}

impl MusicStore {
    /// Load persisted state. Favorites and the video-id cache come back
    /// whole; the last played track is restored as a fresh single-element
    /// queue, paused, with the saved progress.
    pub fn new(storage: Storage, policy: QueuePolicy) -> Self {
        let favorites: Vec<Track> = storage
            .load_favorites()
            .into_iter()
            .map(|mut t| {
                t.liked = true;
                t
            })
            .collect();
        let video_ids = storage.load_video_ids();
        let last_played = storage.load_last_played().map(|mut t| {
            t.liked = favorites.iter().any(|f| f.id == t.id);
            t
        });
        let mut progress_secs = storage.load_position();
        if let Some(ref t) = last_played {
            if t.duration_secs > 0 {
                progress_secs = progress_secs.min(t.duration_secs);
            }
        } else {
            progress_secs = 0;
        }

        MusicStore {
            storage,
            policy,
            queue: last_played.clone().into_iter().collect(),
            current: last_played,
            position: 0,
            is_playing: false,
            progress_secs,
            favorites,
            video_ids,
            search_results: Vec::new(),
            mood_blocks: Vec::new(),
            is_loading: false,
            pending_lookup: None,
        }
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    pub fn search_results(&self) -> &[Track] {
        &self.search_results
    }

    pub fn mood_blocks(&self) -> &[MoodBlock] {
        &self.mood_blocks
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn progress_secs(&self) -> u32 {
        self.progress_secs
    }

    pub fn cached_video_id(&self, track_id: &str) -> Option<&str> {
        self.video_ids.get(track_id).map(String::as_str)
    }

    pub fn is_liked(&self, track_id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == track_id)
    }

    // ── Playback ─────────────────────────────────────────────────────────

    /// Make `track` the current track. With an explicit `(queue, index)`
    /// context the queue is replaced wholesale; without one, a track
    /// already in the queue is jumped to in place, and an unknown track
    /// gets a fresh single-element queue.
    pub fn set_current_track(&mut self, track: Track, context: Option<(Vec<Track>, usize)>) {
        let mut track = track;
        track.liked = self.is_liked(&track.id);

        match context {
            Some((queue, index)) if index < queue.len() => {
                let stamped: Vec<Track> = {
                    let favorites = &self.favorites;
                    queue
                        .into_iter()
                        .map(|mut t| {
                            t.liked = favorites.iter().any(|f| f.id == t.id);
                            t
                        })
                        .collect()
                };
                self.queue = stamped;
                self.position = index;
                // The caller promises track == queue[index]; enforce it so
                // the queue invariant cannot be broken from outside.
                self.queue[index] = track.clone();
            }
            _ => {
                if let Some(pos) = self.queue.iter().position(|t| t.id == track.id) {
                    self.position = pos;
                    self.queue[pos] = track.clone();
                } else {
                    self.queue = vec![track.clone()];
                    self.position = 0;
                }
            }
        }

        self.current = Some(track.clone());
        self.progress_secs = 0;
        self.is_playing = true;
        self.pending_lookup = None;
        self.storage.save_last_played(&track);
        self.storage.save_position(0);
    }

    /// Step the queue. Returns whether the position moved; at a boundary
    /// with wrapping disabled nothing changes and `false` comes back.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        let last = self.queue.len() - 1;
        let next = match direction {
            Direction::Next => {
                if self.position < last {
                    self.position + 1
                } else if self.policy.wrap {
                    0
                } else {
                    return false;
                }
            }
            Direction::Previous => {
                if self.position > 0 {
                    self.position - 1
                } else if self.policy.wrap {
                    last
                } else {
                    return false;
                }
            }
        };

        self.position = next;
        let track = self.queue[next].clone();
        self.current = Some(track.clone());
        self.progress_secs = 0;
        self.is_playing = true;
        self.pending_lookup = None;
        self.storage.save_last_played(&track);
        self.storage.save_position(0);
        true
    }

    pub fn toggle_play_pause(&mut self) {
        if self.current.is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn set_progress(&mut self, secs: u32) {
        let secs = match self.current {
            Some(ref t) if t.duration_secs > 0 => secs.min(t.duration_secs),
            _ => secs,
        };
        self.progress_secs = secs;
        self.storage.save_position(secs);
    }

    /// Advance local progress by one second. Returns true exactly when the
    /// current track just ran out, so the caller can auto-advance.
    pub fn tick_progress(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        let duration = match self.current {
            Some(ref t) => t.duration_secs,
            None => return false,
        };
        self.progress_secs += 1;
        if self.progress_secs % 10 == 0 {
            self.storage.save_position(self.progress_secs);
        }
        if duration > 0 && self.progress_secs >= duration {
            self.progress_secs = duration;
            return true;
        }
        false
    }

    // ── Favorites ────────────────────────────────────────────────────────

    /// Flip a track's liked state and fan the new flag out to every
    /// in-memory view of that id — current track, queue, search results,
    /// mood blocks — so the heart looks the same everywhere. Returns the
    /// new liked state.
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        let liked = !self.is_liked(&track.id);
        if liked {
            let mut entry = track.clone();
            entry.liked = true;
            self.favorites.push(entry);
        } else {
            self.favorites.retain(|f| f.id != track.id);
        }

        let id = track.id.clone();
        if let Some(ref mut cur) = self.current {
            if cur.id == id {
                cur.liked = liked;
            }
        }
        for t in self.queue.iter_mut().filter(|t| t.id == id) {
            t.liked = liked;
        }
        for t in self.search_results.iter_mut().filter(|t| t.id == id) {
            t.liked = liked;
        }
        for block in self.mood_blocks.iter_mut() {
            for t in block.tracks.iter_mut().filter(|t| t.id == id) {
                t.liked = liked;
            }
        }

        self.storage.save_favorites(&self.favorites);
        liked
    }

    // ── Video-id cache ───────────────────────────────────────────────────

    /// Idempotent upsert; persists only when the mapping actually changed.
    pub fn cache_video_id(&mut self, track_id: &str, video_id: &str) {
        let previous = self
            .video_ids
            .insert(track_id.to_string(), video_id.to_string());
        if previous.as_deref() == Some(video_id) {
            return;
        }
        if let Some(ref mut cur) = self.current {
            if cur.id == track_id {
                cur.video_id = Some(video_id.to_string());
            }
        }
        self.storage.save_video_ids(&self.video_ids);
    }

    /// First half of video resolution: `None` when the id is already
    /// cached or a lookup for this track is already in flight, otherwise
    /// the query to hand to the catalog. Marks the lookup pending.
    pub fn needs_video_lookup(&mut self, track: &Track) -> Option<String> {
        if self.video_ids.contains_key(&track.id) {
            return None;
        }
        if self.pending_lookup.as_deref() == Some(track.id.as_str()) {
            return None;
        }
        self.pending_lookup = Some(track.id.clone());
        Some(lookup_query(track))
    }

    /// Second half: feed a finished lookup back in. A result for anything
    /// other than the current track is stale — the user has navigated on —
    /// and is dropped without caching or touching playback state.
    pub fn apply_video_lookup(
        &mut self,
        track_id: &str,
        result: Option<String>,
    ) -> LookupOutcome {
        if self.pending_lookup.as_deref() == Some(track_id) {
            self.pending_lookup = None;
        }
        let is_current = self.current.as_ref().map(|c| c.id.as_str()) == Some(track_id);
        if !is_current {
            debug!("dropping stale video lookup for {track_id}");
            return LookupOutcome::Stale;
        }
        match result {
            Some(video_id) => {
                self.cache_video_id(track_id, &video_id);
                LookupOutcome::Resolved
            }
            None => LookupOutcome::NotFound,
        }
    }

    // ── Ingestion ────────────────────────────────────────────────────────

    pub fn set_search_results(&mut self, mut tracks: Vec<Track>) {
        for t in tracks.iter_mut() {
            t.liked = self.favorites.iter().any(|f| f.id == t.id);
        }
        self.search_results = tracks;
    }

    pub fn set_mood_blocks(&mut self, mut blocks: Vec<MoodBlock>) {
        for block in blocks.iter_mut() {
            for t in block.tracks.iter_mut() {
                t.liked = self.favorites.iter().any(|f| f.id == t.id);
            }
        }
        self.mood_blocks = blocks;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RawTrack, Track};

    fn scratch_storage(tag: &str) -> Storage {
        let dir =
            std::env::temp_dir().join(format!("luna-store-{tag}-{:08x}", rand::random::<u32>()));
        Storage::new(Some(dir)).unwrap()
    }

    fn store(tag: &str) -> MusicStore {
        MusicStore::new(scratch_storage(tag), QueuePolicy::default())
    }

    fn wrapping_store(tag: &str) -> MusicStore {
        MusicStore::new(scratch_storage(tag), QueuePolicy { wrap: true })
    }

    fn track(id: &str) -> Track {
        let mut t = Track::from_raw(RawTrack::default());
        t.id = id.to_string();
        t.title = format!("Track {id}");
        t.artist = "Artist".to_string();
        t.duration_secs = 180;
        t
    }

    fn assert_queue_invariant(store: &MusicStore) {
        if store.queue().is_empty() {
            return;
        }
        let current = store.current().expect("non-empty queue must have a current track");
        assert_eq!(
            current.id,
            store.queue()[store.position()].id,
            "current must equal queue[position]"
        );
    }

    // ── Queue invariant and advance ──────────────────────────────────────

    #[test]
    fn set_current_with_explicit_context_replaces_queue() {
        let mut s = store("ctx");
        let q = vec![track("1"), track("2"), track("3")];
        s.set_current_track(track("2"), Some((q, 1)));
        assert_eq!(s.position(), 1);
        assert_eq!(s.queue().len(), 3);
        assert_eq!(s.current().unwrap().id, "2");
        assert!(s.is_playing());
        assert_eq!(s.progress_secs(), 0);
        assert_queue_invariant(&s);
    }

    #[test]
    fn set_current_without_context_jumps_to_existing_entry() {
        let mut s = store("jump");
        s.set_current_track(track("1"), Some((vec![track("1"), track("2"), track("3")], 0)));
        s.set_current_track(track("3"), None);
        assert_eq!(s.position(), 2);
        assert_eq!(s.queue().len(), 3, "existing queue must be kept");
        assert_queue_invariant(&s);
    }

    #[test]
    fn set_current_with_unknown_track_makes_singleton_queue() {
        let mut s = store("singleton");
        s.set_current_track(track("1"), Some((vec![track("1"), track("2")], 0)));
        s.set_current_track(track("9"), None);
        assert_eq!(s.queue().len(), 1);
        assert_eq!(s.position(), 0);
        assert_eq!(s.current().unwrap().id, "9");
        assert_queue_invariant(&s);
    }

    #[test]
    fn advance_walks_a_full_session() {
        // queue = [T1,T2,T3], position=0, then next/next/next/prev/prev/prev.
        let mut s = store("scenario");
        s.set_current_track(track("1"), Some((vec![track("1"), track("2"), track("3")], 0)));

        assert!(s.advance(Direction::Next));
        assert_eq!((s.position(), s.current().unwrap().id.as_str()), (1, "2"));
        assert!(s.advance(Direction::Next));
        assert_eq!((s.position(), s.current().unwrap().id.as_str()), (2, "3"));
        assert!(!s.advance(Direction::Next), "past the end must freeze");
        assert_eq!((s.position(), s.current().unwrap().id.as_str()), (2, "3"));

        assert!(s.advance(Direction::Previous));
        assert!(s.advance(Direction::Previous));
        assert_eq!((s.position(), s.current().unwrap().id.as_str()), (0, "1"));
        assert!(!s.advance(Direction::Previous), "before the start must freeze");
        assert_eq!((s.position(), s.current().unwrap().id.as_str()), (0, "1"));
        assert_queue_invariant(&s);
    }

    #[test]
    fn advance_on_empty_queue_is_noop() {
        let mut s = store("empty");
        assert!(!s.advance(Direction::Next));
        assert!(!s.advance(Direction::Previous));
        assert!(s.current().is_none());
    }

    #[test]
    fn advance_resets_progress() {
        let mut s = store("progress");
        s.set_current_track(track("1"), Some((vec![track("1"), track("2")], 0)));
        s.set_progress(90);
        assert!(s.advance(Direction::Next));
        assert_eq!(s.progress_secs(), 0);
    }

    #[test]
    fn wrap_policy_loops_both_ways() {
        let mut s = wrapping_store("wrap");
        s.set_current_track(track("3"), Some((vec![track("1"), track("2"), track("3")], 2)));
        assert_eq!(s.position(), 2);
        assert!(s.advance(Direction::Next));
        assert_eq!(s.position(), 0);
        assert!(s.advance(Direction::Previous));
        assert_eq!(s.position(), 2);
        assert_queue_invariant(&s);
    }

    #[test]
    fn duplicate_ids_in_queue_stay_addressable_by_position() {
        let mut s = store("dups");
        let q = vec![track("1"), track("2"), track("1")];
        s.set_current_track(track("1"), Some((q, 2)));
        assert_eq!(s.position(), 2);
        assert!(!s.advance(Direction::Next));
        assert!(s.advance(Direction::Previous));
        assert_eq!(s.position(), 1);
        assert_queue_invariant(&s);
    }

    // ── Favorites ────────────────────────────────────────────────────────

    #[test]
    fn toggle_favorite_round_trips() {
        let mut s = store("favtoggle");
        let t = track("5");
        assert!(s.toggle_favorite(&t));
        assert_eq!(s.favorites().len(), 1);
        assert!(s.favorites()[0].liked);
        assert!(!s.toggle_favorite(&t));
        assert!(s.favorites().is_empty());
    }

    #[test]
    fn favorites_never_hold_duplicate_ids() {
        let mut s = store("favdup");
        let t = track("5");
        s.toggle_favorite(&t);
        s.toggle_favorite(&t);
        s.toggle_favorite(&t);
        assert_eq!(s.favorites().len(), 1);
        let ids: Vec<&str> = s.favorites().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
    }

    #[test]
    fn toggle_favorite_fans_out_to_every_view() {
        let mut s = store("fanout");
        s.set_search_results(vec![track("1"), track("2")]);
        s.set_mood_blocks(vec![MoodBlock {
            mood: Mood::Chill,
            title: "CHILL".into(),
            tracks: vec![track("2"), track("3")],
        }]);
        s.set_current_track(track("2"), Some((vec![track("1"), track("2")], 1)));

        s.toggle_favorite(&track("2"));
        assert!(s.current().unwrap().liked);
        assert!(s.queue()[1].liked);
        assert!(s.search_results()[1].liked);
        assert!(s.mood_blocks()[0].tracks[0].liked);
        assert!(!s.search_results()[0].liked, "other ids must be untouched");
        assert!(!s.mood_blocks()[0].tracks[1].liked);

        s.toggle_favorite(&track("2"));
        assert!(!s.current().unwrap().liked);
        assert!(!s.queue()[1].liked);
        assert!(!s.search_results()[1].liked);
        assert!(!s.mood_blocks()[0].tracks[0].liked);
    }

    #[test]
    fn ingested_lists_arrive_stamped_with_liked_state() {
        let mut s = store("stamp");
        s.toggle_favorite(&track("2"));
        s.set_search_results(vec![track("1"), track("2")]);
        assert!(!s.search_results()[0].liked);
        assert!(s.search_results()[1].liked);

        s.set_mood_blocks(vec![MoodBlock {
            mood: Mood::Happy,
            title: "HAPPY".into(),
            tracks: vec![track("2")],
        }]);
        assert!(s.mood_blocks()[0].tracks[0].liked);
    }

    #[test]
    fn favorites_survive_a_restart() {
        let dir = std::env::temp_dir().join(format!("luna-store-persist-{:08x}", rand::random::<u32>()));
        {
            let storage = Storage::new(Some(dir.clone())).unwrap();
            let mut s = MusicStore::new(storage, QueuePolicy::default());
            s.toggle_favorite(&track("5"));
            s.set_current_track(track("5"), None);
            s.cache_video_id("5", "vid-5");
        }
        let storage = Storage::new(Some(dir)).unwrap();
        let s = MusicStore::new(storage, QueuePolicy::default());
        assert_eq!(s.favorites().len(), 1);
        assert!(s.favorites()[0].liked);
        // Last played comes back as a paused singleton queue.
        assert_eq!(s.current().unwrap().id, "5");
        assert!(s.current().unwrap().liked);
        assert_eq!(s.queue().len(), 1);
        assert!(!s.is_playing());
        assert_eq!(s.cached_video_id("5"), Some("vid-5"));
        assert_queue_invariant(&s);
    }

    // ── Video-id cache and stale guard ───────────────────────────────────

    #[test]
    fn cache_video_id_is_idempotent() {
        let mut s = store("cache");
        s.cache_video_id("1", "vid-1");
        s.cache_video_id("1", "vid-1");
        assert_eq!(s.cached_video_id("1"), Some("vid-1"));
        s.cache_video_id("1", "vid-other");
        assert_eq!(s.cached_video_id("1"), Some("vid-other"));
    }

    #[test]
    fn cached_track_needs_no_lookup() {
        let mut s = store("nolookup");
        s.cache_video_id("1", "vid-1");
        assert_eq!(s.needs_video_lookup(&track("1")), None);
    }

    #[test]
    fn lookup_query_combines_title_and_artist() {
        let t = track("1");
        assert_eq!(lookup_query(&t), "Track 1 Artist");
    }

    #[test]
    fn pending_lookup_is_not_reissued() {
        let mut s = store("pending");
        let t = track("1");
        assert!(s.needs_video_lookup(&t).is_some());
        assert_eq!(s.needs_video_lookup(&t), None, "lookup already in flight");
    }

    #[test]
    fn resolution_for_current_track_is_applied() {
        let mut s = store("resolve");
        let t = track("1");
        s.set_current_track(t.clone(), None);
        let query = s.needs_video_lookup(&t).unwrap();
        assert_eq!(query, "Track 1 Artist");
        assert_eq!(
            s.apply_video_lookup("1", Some("vid-1".into())),
            LookupOutcome::Resolved
        );
        assert_eq!(s.cached_video_id("1"), Some("vid-1"));
        assert_eq!(s.current().unwrap().video_id.as_deref(), Some("vid-1"));
    }

    #[test]
    fn stale_resolution_is_discarded() {
        // setCurrentTrack(A), lookup in flight, setCurrentTrack(B),
        // then A's result lands: it must change nothing.
        let mut s = store("stale");
        let a = track("A");
        let b = track("B");
        s.set_current_track(a.clone(), None);
        s.needs_video_lookup(&a).unwrap();
        s.set_current_track(b.clone(), None);

        assert_eq!(
            s.apply_video_lookup("A", Some("vid-A".into())),
            LookupOutcome::Stale
        );
        assert_eq!(s.current().unwrap().id, "B");
        assert_eq!(s.cached_video_id("A"), None, "stale result must not be cached");
        assert!(s.current().unwrap().video_id.is_none());
    }

    #[test]
    fn failed_lookup_leaves_state_intact() {
        let mut s = store("nomatch");
        let t = track("1");
        s.set_current_track(t.clone(), None);
        s.needs_video_lookup(&t).unwrap();
        assert_eq!(s.apply_video_lookup("1", None), LookupOutcome::NotFound);
        assert_eq!(s.current().unwrap().id, "1");
        assert_eq!(s.cached_video_id("1"), None);
        assert_queue_invariant(&s);
    }

    #[test]
    fn navigation_clears_the_pending_lookup() {
        let mut s = store("navclear");
        let a = track("A");
        s.set_current_track(a.clone(), None);
        s.needs_video_lookup(&a).unwrap();
        s.set_current_track(track("B"), None);
        // A fresh lookup for the new current track must be issued.
        assert!(s.needs_video_lookup(&track("B")).is_some());
    }

    // ── Progress ─────────────────────────────────────────────────────────

    #[test]
    fn tick_reports_end_of_track_once() {
        let mut s = store("tickend");
        let mut t = track("1");
        t.duration_secs = 3;
        s.set_current_track(t, None);
        assert!(!s.tick_progress());
        assert!(!s.tick_progress());
        assert!(s.tick_progress(), "third tick reaches the 3s duration");
        assert_eq!(s.progress_secs(), 3);
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut s = store("tickpause");
        s.set_current_track(track("1"), None);
        s.toggle_play_pause();
        assert!(!s.tick_progress());
        assert_eq!(s.progress_secs(), 0);
    }

    #[test]
    fn set_progress_clamps_to_duration() {
        let mut s = store("clamp");
        s.set_current_track(track("1"), None);
        s.set_progress(9999);
        assert_eq!(s.progress_secs(), 180);
    }

    #[test]
    fn play_pause_requires_a_track() {
        let mut s = store("pp");
        s.toggle_play_pause();
        assert!(!s.is_playing());
        s.set_current_track(track("1"), None);
        assert!(s.is_playing());
        s.toggle_play_pause();
        assert!(!s.is_playing());
    }
}
