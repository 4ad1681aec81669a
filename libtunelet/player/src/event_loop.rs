use tracing::{error, info};

use crate::controller::Controller;
use crate::dto::command::Command;
use crate::dto::player_response::PlayerResponse;
use crate::playback_port::PlaybackPort;
use crate::two_way_channel::TwoWayReceiver;

pub(crate) async fn main_loop<P: PlaybackPort>(
    mut receiver: TwoWayReceiver<Command, PlayerResponse>,
    mut controller: Controller<P>,
) {
    controller.start();

    while let Ok(next_command) = receiver.recv_async().await {
        info!("Got command {:?}", next_command);
        match next_command {
            Command::TogglePlay => {
                controller.toggle_play();
            }
            Command::Next => {
                controller.go_next();
            }
            Command::Previous => {
                controller.go_previous();
            }
            Command::Seek(fraction) => {
                controller.seek(fraction);
            }
            Command::SetVolume(fraction) => {
                controller.set_volume(fraction);
            }
            Command::ToggleMute => {
                controller.toggle_mute();
            }
            Command::ToggleLoop => {
                controller.toggle_loop();
            }
            Command::ToggleShuffle => {
                controller.toggle_shuffle();
            }
            Command::Media(event) => {
                controller.on_media(event);
            }
            Command::LoadingElapsed(ticket) => {
                controller.on_loading_elapsed(ticket);
            }
            Command::GetCurrentStatus => {
                let current_status = controller.get_current_status();
                if let Err(e) = receiver.respond(PlayerResponse::StatusResponse(current_status)) {
                    error!("Error sending player status: {e:?}");
                }
            }
            Command::Shutdown => {
                info!("Shutting down player loop");
                return;
            }
        }
    }
    info!("Request loop completed");
}
