use super::player_state::PlayerState;

#[derive(Clone, Debug)]
pub(crate) enum PlayerResponse {
    StatusResponse(PlayerState),
}
