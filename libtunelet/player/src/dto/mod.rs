pub(crate) mod command;
pub(crate) mod loop_mode;
pub(crate) mod media_event;
pub(crate) mod player_event;
pub(crate) mod player_response;
pub(crate) mod player_state;
pub(crate) mod track;
pub(crate) mod transport_phase;
