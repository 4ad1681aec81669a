use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tap::TapFallible;
use tracing::{debug, warn};

use crate::dto::media_event::MediaEvent;
use crate::dto::track::Track;
use crate::playback_port::{MediaEventSender, PlaybackPort};
use crate::tunelet_player::PlayerError;

#[derive(Clone, Debug, PartialEq)]
pub enum PortCall {
    Load(u32),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<PortCall>,
    durations: HashMap<u32, f64>,
    default_duration: Option<f64>,
    events: Option<MediaEventSender>,
    loaded: Option<u32>,
    playing: bool,
    position: f64,
    volume: f64,
    muted: bool,
}

/// In-memory playback port. Every call is recorded, and loading a track with
/// a configured duration reports it back as `MetadataLoaded`, the way a real
/// media element would once it has read the file header.
///
/// Clones share the same state, so a host can keep one to inspect calls and
/// emit events after moving another into the player.
#[derive(Clone, Debug, Default)]
pub struct MockPort {
    state: Arc<Mutex<MockState>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(self, track_id: u32, seconds: f64) -> Self {
        self.lock().durations.insert(track_id, seconds);
        self
    }

    /// Duration reported for every track without an explicit entry.
    pub fn with_default_duration(self, seconds: f64) -> Self {
        self.lock().default_duration = Some(seconds);
        self
    }

    pub fn calls(&self) -> Vec<PortCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn loaded(&self) -> Option<u32> {
        self.lock().loaded
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    pub fn position(&self) -> f64 {
        self.lock().position
    }

    pub fn volume(&self) -> f64 {
        self.lock().volume
    }

    pub fn is_muted(&self) -> bool {
        self.lock().muted
    }

    /// Emits a media event as if the underlying element produced it.
    pub fn emit(&self, event: MediaEvent) -> Result<(), PlayerError> {
        let events = self
            .lock()
            .events
            .clone()
            .ok_or_else(|| PlayerError("Mock port is not attached to a player".to_owned()))?;
        events.send(event)
    }

    /// Reports a position update and remembers it as the current position.
    pub fn advance_to(&self, seconds: f64) -> Result<(), PlayerError> {
        self.lock().position = seconds;
        self.emit(MediaEvent::TimeUpdate(seconds))
    }

    /// Reports the end of the loaded track.
    pub fn finish(&self) -> Result<(), PlayerError> {
        {
            let mut state = self.lock();
            state.playing = false;
            if let Some(duration) = state.loaded.and_then(|id| state.duration_of(id)) {
                state.position = duration;
            }
        }
        self.emit(MediaEvent::Ended)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MockState {
    fn duration_of(&self, track_id: u32) -> Option<f64> {
        self.durations
            .get(&track_id)
            .copied()
            .or(self.default_duration)
    }
}

impl PlaybackPort for MockPort {
    fn attach(&mut self, events: MediaEventSender) {
        self.lock().events = Some(events);
    }

    fn load(&mut self, track: &Track) {
        let mut state = self.lock();
        debug!("Mock port loading {}", track.source);
        state.calls.push(PortCall::Load(track.id));
        state.loaded = Some(track.id);
        state.playing = false;
        state.position = 0.0;

        if let (Some(duration), Some(events)) = (state.duration_of(track.id), &state.events) {
            events
                .metadata_loaded(duration)
                .tap_err(|e| warn!("Mock port could not report metadata: {e}"))
                .ok();
        }
    }

    fn play(&mut self) {
        let mut state = self.lock();
        state.calls.push(PortCall::Play);
        state.playing = true;
    }

    fn pause(&mut self) {
        let mut state = self.lock();
        state.calls.push(PortCall::Pause);
        state.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.lock();
        state.calls.push(PortCall::Seek(seconds));
        state.position = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        let mut state = self.lock();
        state.calls.push(PortCall::SetVolume(volume));
        state.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        let mut state = self.lock();
        state.calls.push(PortCall::SetMuted(muted));
        state.muted = muted;
    }
}
