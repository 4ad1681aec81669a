use strum::Display;

use super::player_state::PlayerState;

#[derive(Clone, Debug, Display)]
pub enum PlayerEvent {
    Started(PlayerState),
    Loading(PlayerState),
    Resume(PlayerState),
    Pause(PlayerState),
    TrackChanged(PlayerState),
    Seek(PlayerState, f64),
    Position(PlayerState),
    DurationChanged(PlayerState),
    SetVolume(PlayerState),
    SetMuted(PlayerState),
    LoopModeChanged(PlayerState),
    ShuffleChanged(PlayerState),
    Ended(PlayerState),
    PlaylistEnded(PlayerState),
}

impl PlayerEvent {
    pub fn state(&self) -> &PlayerState {
        match self {
            PlayerEvent::Started(state)
            | PlayerEvent::Loading(state)
            | PlayerEvent::Resume(state)
            | PlayerEvent::Pause(state)
            | PlayerEvent::TrackChanged(state)
            | PlayerEvent::Seek(state, _)
            | PlayerEvent::Position(state)
            | PlayerEvent::DurationChanged(state)
            | PlayerEvent::SetVolume(state)
            | PlayerEvent::SetMuted(state)
            | PlayerEvent::LoopModeChanged(state)
            | PlayerEvent::ShuffleChanged(state)
            | PlayerEvent::Ended(state)
            | PlayerEvent::PlaylistEnded(state) => state,
        }
    }
}
