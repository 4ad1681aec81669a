mod controller;
mod display;
mod dto;
mod event_loop;
mod mock_port;
mod playback_port;
mod playlist;
mod progress;
mod settings;
mod timer;
mod two_way_channel;

pub mod tunelet_player {
    use derivative::Derivative;
    use tap::TapFallible;
    use thiserror::Error;
    use tokio::sync::broadcast;
    use tokio::task::JoinHandle;
    use tracing::{info, warn};

    use crate::controller::Controller;
    use crate::dto::command::Command;
    use crate::dto::player_response::PlayerResponse;
    use crate::event_loop::main_loop;
    use crate::two_way_channel::{TwoWaySender, two_way_channel};

    pub use crate::display::{Indicators, format_time};
    pub use crate::dto::loop_mode::LoopMode;
    pub use crate::dto::media_event::MediaEvent;
    pub use crate::dto::player_event::PlayerEvent;
    pub use crate::dto::player_state::PlayerState;
    pub use crate::dto::track::Track;
    pub use crate::dto::transport_phase::TransportPhase;
    pub use crate::mock_port::{MockPort, PortCall};
    pub use crate::playback_port::{MediaEventSender, PlaybackPort};
    pub use crate::playlist::{Playlist, PlaylistError};
    pub use crate::progress::fraction_of;
    pub use crate::settings::{NavigationOverlap, Settings};

    #[derive(Debug, Clone, Error)]
    #[error("{0}")]
    pub struct PlayerError(pub(crate) String);

    /// Handle to a running player. All operations are queued onto a single
    /// control loop, so they are applied in the order they are sent.
    #[derive(Derivative)]
    #[derivative(Debug)]
    pub struct TuneletPlayer {
        cmd_sender: TwoWaySender<Command, PlayerResponse>,
        event_tx: broadcast::Sender<PlayerEvent>,
        playlist: Playlist,
        #[derivative(Debug = "ignore")]
        main_handle: Option<JoinHandle<()>>,
        joined: bool,
    }

    impl TuneletPlayer {
        /// Starts the control loop on the current tokio runtime. The port is
        /// attached, loaded with the first track and given the initial volume
        /// before any queued command runs.
        pub fn new<P>(mut port: P, playlist: Playlist, settings: Settings) -> Self
        where
            P: PlaybackPort + Send + 'static,
        {
            let (event_tx, _) = broadcast::channel(settings.event_capacity.max(1));
            let (cmd_tx, cmd_rx) = two_way_channel();

            port.attach(MediaEventSender::new(cmd_tx.clone()));
            let controller = Controller::new(
                port,
                playlist.clone(),
                &settings,
                event_tx.clone(),
                cmd_tx.clone(),
            );
            let main_handle = tokio::spawn(main_loop(cmd_rx, controller));

            TuneletPlayer {
                cmd_sender: cmd_tx,
                event_tx,
                playlist,
                main_handle: Some(main_handle),
                joined: false,
            }
        }

        pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
            self.event_tx.subscribe()
        }

        pub fn playlist(&self) -> &Playlist {
            &self.playlist
        }

        /// Sender for hosts that forward events from their media element.
        pub fn media_events(&self) -> MediaEventSender {
            MediaEventSender::new(self.cmd_sender.clone())
        }

        pub async fn get_current_status(&self) -> Result<PlayerState, PlayerError> {
            match self
                .cmd_sender
                .get_response(Command::GetCurrentStatus)
                .await
            {
                Ok(PlayerResponse::StatusResponse(state)) => Ok(state),
                Err(e) => Err(PlayerError(format!("Error getting current status: {e}"))),
            }
        }

        pub async fn toggle_play(&self) -> Result<(), PlayerError> {
            self.send(Command::TogglePlay).await
        }

        pub async fn next(&self) -> Result<(), PlayerError> {
            self.send(Command::Next).await
        }

        pub async fn previous(&self) -> Result<(), PlayerError> {
            self.send(Command::Previous).await
        }

        /// Seeks to `fraction` of the current track. Values outside `0..=1`
        /// are clamped.
        pub async fn seek(&self, fraction: f64) -> Result<(), PlayerError> {
            self.send(Command::Seek(fraction)).await
        }

        /// Sets the volume from a `0..=1` fraction, rounded to the nearest
        /// percent.
        pub async fn set_volume(&self, fraction: f64) -> Result<(), PlayerError> {
            self.send(Command::SetVolume(fraction)).await
        }

        pub async fn toggle_mute(&self) -> Result<(), PlayerError> {
            self.send(Command::ToggleMute).await
        }

        pub async fn toggle_loop(&self) -> Result<(), PlayerError> {
            self.send(Command::ToggleLoop).await
        }

        pub async fn toggle_shuffle(&self) -> Result<(), PlayerError> {
            self.send(Command::ToggleShuffle).await
        }

        pub async fn join(mut self) -> Result<(), PlayerError> {
            info!("Joining player instance");
            self.send(Command::Shutdown).await?;
            self.joined = true;
            if let Some(handle) = self.main_handle.take() {
                handle
                    .await
                    .map_err(|e| PlayerError(format!("Error joining player loop: {e}")))?;
            }
            info!("Player loop terminated");
            Ok(())
        }

        async fn send(&self, command: Command) -> Result<(), PlayerError> {
            self.cmd_sender
                .send_async(command)
                .await
                .map_err(|e| PlayerError(format!("{e}")))
        }
    }

    impl Drop for TuneletPlayer {
        fn drop(&mut self) {
            if !self.joined {
                info!("join() not called, stopping player loop in the background");
                self.cmd_sender
                    .send(Command::Shutdown)
                    .tap_err(|e| warn!("Error stopping player loop: {e}"))
                    .ok();
            }
        }
    }
}

#[cfg(test)]
#[path = "./lib_test.rs"]
mod lib_test;
