use crate::dto::command::Command;
use crate::dto::media_event::MediaEvent;
use crate::dto::player_response::PlayerResponse;
use crate::dto::track::Track;
use crate::tunelet_player::PlayerError;
use crate::two_way_channel::TwoWaySender;

/// The media primitive driven by the player. Commands are fire-and-forget;
/// the port reports back through the `MediaEventSender` it receives in
/// `attach`, which is called once before any other method.
///
/// Failures inside the port (unsupported source, output errors) are the
/// port's own concern and are not reported to the player.
pub trait PlaybackPort {
    fn attach(&mut self, events: MediaEventSender);

    /// Binds the port to `track`. Playback position starts over and the port
    /// should emit `MediaEvent::MetadataLoaded` once the duration is known.
    fn load(&mut self, track: &Track);

    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    /// `0.0..=1.0`
    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);
}

/// Queues media events onto the player's command loop. Cheap to clone and
/// usable from any thread.
#[derive(Clone, Debug)]
pub struct MediaEventSender {
    cmd_tx: TwoWaySender<Command, PlayerResponse>,
}

impl MediaEventSender {
    pub(crate) fn new(cmd_tx: TwoWaySender<Command, PlayerResponse>) -> Self {
        Self { cmd_tx }
    }

    pub fn send(&self, event: MediaEvent) -> Result<(), PlayerError> {
        self.cmd_tx
            .send(Command::Media(event))
            .map_err(|e| PlayerError(format!("Error sending media event {event:?}: {e}")))
    }

    pub fn time_update(&self, seconds: f64) -> Result<(), PlayerError> {
        self.send(MediaEvent::TimeUpdate(seconds))
    }

    pub fn metadata_loaded(&self, duration: f64) -> Result<(), PlayerError> {
        self.send(MediaEvent::MetadataLoaded { duration })
    }

    pub fn ended(&self) -> Result<(), PlayerError> {
        self.send(MediaEvent::Ended)
    }
}
