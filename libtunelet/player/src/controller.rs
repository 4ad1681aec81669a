use derivative::Derivative;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::dto::command::Command;
use crate::dto::loop_mode::LoopMode;
use crate::dto::media_event::MediaEvent;
use crate::dto::player_event::PlayerEvent;
use crate::dto::player_response::PlayerResponse;
use crate::dto::player_state::PlayerState;
use crate::dto::transport_phase::TransportPhase;
use crate::playback_port::PlaybackPort;
use crate::playlist::Playlist;
use crate::progress::{clamp_fraction, clamp_position, normalize_duration, progress_percent};
use crate::settings::{NavigationOverlap, Settings};
use crate::timer::LoadingTimer;
use crate::two_way_channel::TwoWaySender;

/// Where a pending loading transition lands once its timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTransition {
    target: TransportPhase,
    // Net cursor movement applied when the timer fires
    step: isize,
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub(crate) struct Controller<P: PlaybackPort> {
    #[derivative(Debug = "ignore")]
    port: P,
    playlist: Playlist,
    event_tx: broadcast::Sender<PlayerEvent>,
    timer: LoadingTimer,
    pending: Option<PendingTransition>,
    overlap: NavigationOverlap,
    rng: StdRng,
    phase: TransportPhase,
    index: usize,
    current_time: f64,
    duration: f64,
    volume: u8,
    muted: bool,
    loop_mode: LoopMode,
    shuffle: bool,
}

impl<P: PlaybackPort> Controller<P> {
    pub(crate) fn new(
        port: P,
        playlist: Playlist,
        settings: &Settings,
        event_tx: broadcast::Sender<PlayerEvent>,
        cmd_tx: TwoWaySender<Command, PlayerResponse>,
    ) -> Self {
        let rng = match settings.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            port,
            playlist,
            event_tx,
            timer: LoadingTimer::new(settings.loading_delay, cmd_tx),
            pending: None,
            overlap: settings.navigation_overlap,
            rng,
            phase: TransportPhase::Paused,
            index: 0,
            current_time: 0.0,
            duration: 0.0,
            volume: settings.initial_volume.min(100),
            muted: false,
            loop_mode: LoopMode::Off,
            shuffle: false,
        }
    }

    pub(crate) fn start(&mut self) {
        let track = self.playlist.track(self.index);
        info!(
            "Starting player with {} tracks, first track: {}",
            self.playlist.len(),
            track.title
        );
        self.port.load(track);
        self.port.set_volume(self.native_volume());
        self.port.set_muted(self.muted);
        self.emit(PlayerEvent::Started);
    }

    pub(crate) fn get_current_status(&self) -> PlayerState {
        self.snapshot()
    }

    pub(crate) fn toggle_play(&mut self) {
        match self.phase {
            TransportPhase::Loading => {
                debug!("Ignoring play/pause toggle while loading");
            }
            TransportPhase::Paused => self.begin_loading(TransportPhase::Playing, 0),
            TransportPhase::Playing => self.begin_loading(TransportPhase::Paused, 0),
        }
    }

    pub(crate) fn go_next(&mut self) {
        self.navigate(1);
    }

    pub(crate) fn go_previous(&mut self) {
        self.navigate(-1);
    }

    fn navigate(&mut self, step: isize) {
        match (self.phase, self.overlap) {
            (TransportPhase::Playing, _) => {
                info!("Current position: {}, loading step {step}", self.index);
                self.begin_loading(TransportPhase::Playing, step);
            }
            (TransportPhase::Paused, _) | (TransportPhase::Loading, NavigationOverlap::Concurrent) => {
                let index = self.playlist.offset(self.index, step);
                info!(
                    "Current position: {}, moving to {index} without loading",
                    self.index
                );
                self.select_index(index);
            }
            (TransportPhase::Loading, NavigationOverlap::Restart) => {
                let target = self
                    .pending
                    .map(|pending| pending.target)
                    .unwrap_or(TransportPhase::Playing);
                let step = self.pending.map(|pending| pending.step).unwrap_or(0) + step;
                info!("Restarting loading timer with net step {step}");
                self.begin_loading(target, step);
            }
        }
    }

    fn begin_loading(&mut self, target: TransportPhase, step: isize) {
        self.phase = TransportPhase::Loading;
        self.pending = Some(PendingTransition { target, step });
        let ticket = self.timer.schedule();
        info!("Loading towards {target} (step {step}, ticket {ticket})");
        self.emit(PlayerEvent::Loading);
    }

    pub(crate) fn on_loading_elapsed(&mut self, ticket: u64) {
        if !self.timer.complete(ticket) {
            debug!("Ignoring stale loading timer {ticket}");
            return;
        }
        let Some(pending) = self.pending.take() else {
            debug!("Loading timer {ticket} fired without a pending transition");
            return;
        };

        if pending.step != 0 {
            let index = self.playlist.offset(self.index, pending.step);
            self.select_index(index);
        }
        self.set_phase(pending.target);
    }

    fn cancel_loading(&mut self) {
        if self.timer.is_pending() {
            debug!("Cancelling pending loading transition {:?}", self.pending);
        }
        self.timer.cancel();
        self.pending = None;
    }

    /// Points the port at a new track. Playback continues on the new track
    /// only when the phase is already Playing.
    fn select_index(&mut self, index: usize) {
        self.index = index;
        self.current_time = 0.0;
        self.duration = 0.0;

        let track = self.playlist.track(index);
        info!("Loading track {index}: {} - {}", track.artist, track.title);
        self.port.load(track);
        if self.phase == TransportPhase::Playing {
            self.port.play();
        }
        self.emit(PlayerEvent::TrackChanged);
    }

    fn apply_phase(&mut self, phase: TransportPhase) {
        self.phase = phase;
        match phase {
            TransportPhase::Playing => self.port.play(),
            TransportPhase::Paused => self.port.pause(),
            TransportPhase::Loading => {}
        }
    }

    fn set_phase(&mut self, phase: TransportPhase) {
        self.apply_phase(phase);
        match phase {
            TransportPhase::Playing => self.emit(PlayerEvent::Resume),
            TransportPhase::Paused => self.emit(PlayerEvent::Pause),
            TransportPhase::Loading => self.emit(PlayerEvent::Loading),
        }
    }

    pub(crate) fn seek(&mut self, fraction: f64) {
        let fraction = clamp_fraction(fraction);
        let position = fraction * self.duration;
        info!("Seeking to {position:.2}s ({:.1}%)", fraction * 100.0);
        self.port.seek(position);
        self.current_time = position;
        let state = self.snapshot();
        self.send(PlayerEvent::Seek(state, position));
    }

    pub(crate) fn set_volume(&mut self, fraction: f64) {
        self.volume = (clamp_fraction(fraction) * 100.0).round() as u8;
        info!("Setting volume to {}", self.volume);
        self.port.set_volume(self.native_volume());
        self.emit(PlayerEvent::SetVolume);
    }

    pub(crate) fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        info!("Muted: {}", self.muted);
        self.port.set_muted(self.muted);
        self.emit(PlayerEvent::SetMuted);
    }

    pub(crate) fn toggle_loop(&mut self) {
        self.loop_mode = self.loop_mode.cycle();
        info!("Loop mode: {}", self.loop_mode);
        self.emit(PlayerEvent::LoopModeChanged);
    }

    pub(crate) fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        info!("Shuffle: {}", self.shuffle);
        self.emit(PlayerEvent::ShuffleChanged);
    }

    pub(crate) fn on_media(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(seconds) => {
                self.current_time = clamp_position(seconds, self.duration);
                self.emit(PlayerEvent::Position);
            }
            MediaEvent::MetadataLoaded { duration } => {
                self.duration = normalize_duration(duration);
                self.current_time = clamp_position(self.current_time, self.duration);
                debug!("Duration for track {}: {}", self.index, self.duration);
                self.emit(PlayerEvent::DurationChanged);
            }
            MediaEvent::Ended => self.on_ended(),
        }
    }

    fn on_ended(&mut self) {
        info!("Received ended event for track {}", self.index);
        self.emit(PlayerEvent::Ended);

        let last = self.playlist.last_index();
        if self.loop_mode == LoopMode::One {
            info!("Looping track {}", self.index);
            self.port.seek(0.0);
            self.current_time = 0.0;
            if self.phase == TransportPhase::Loading {
                self.port.play();
                self.emit(PlayerEvent::Position);
            } else {
                self.set_phase(TransportPhase::Playing);
            }
        } else if self.shuffle && self.playlist.len() > 1 {
            let index = self.playlist.random_other(self.index, &mut self.rng);
            info!("Shuffling from {} to {index}", self.index);
            self.continue_at(index);
        } else if self.loop_mode == LoopMode::All && self.index == last {
            info!("Reached end of playlist, wrapping around");
            self.continue_at(0);
        } else if self.index < last {
            self.go_next();
        } else {
            info!("Reached end of playlist, stopping");
            self.cancel_loading();
            // Unknown durations keep the last reported position
            if self.duration > 0.0 {
                self.current_time = self.duration;
            }
            self.apply_phase(TransportPhase::Paused);
            self.emit(PlayerEvent::PlaylistEnded);
        }
    }

    /// Switches tracks without a loading transition and keeps playing.
    fn continue_at(&mut self, index: usize) {
        if self.phase != TransportPhase::Loading {
            self.phase = TransportPhase::Playing;
        }
        self.select_index(index);
    }

    fn native_volume(&self) -> f64 {
        f64::from(self.volume) / 100.0
    }

    fn snapshot(&self) -> PlayerState {
        PlayerState {
            phase: self.phase,
            track_index: self.index,
            track: self.playlist.track(self.index).clone(),
            current_time: self.current_time,
            duration: self.duration,
            progress: progress_percent(self.current_time, self.duration),
            volume: self.volume,
            muted: self.muted,
            loop_mode: self.loop_mode,
            shuffle: self.shuffle,
        }
    }

    fn emit(&self, event: fn(PlayerState) -> PlayerEvent) {
        self.send(event(self.snapshot()));
    }

    fn send(&self, event: PlayerEvent) {
        debug!("Publishing {event}");
        // No subscribers is not an error
        self.event_tx.send(event).unwrap_or_default();
    }
}

#[cfg(test)]
#[path = "./controller_test.rs"]
mod controller_test;
