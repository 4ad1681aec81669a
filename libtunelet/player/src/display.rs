use crate::dto::loop_mode::LoopMode;
use crate::dto::player_state::PlayerState;
use crate::dto::transport_phase::TransportPhase;

/// Formats seconds as `m:ss`. Unknown or negative values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_owned();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Visual state derived from a player snapshot. Nothing here is stored; a
/// display recomputes it from every event it receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Indicators {
    pub equalizer_active: bool,
    pub artwork_spinning: bool,
    pub glow: bool,
    /// Transport buttons show a spinner and should look disabled.
    pub controls_busy: bool,
    pub shuffle_highlighted: bool,
    pub loop_highlighted: bool,
    pub loop_one_badge: bool,
    pub muted_icon: bool,
}

impl From<&PlayerState> for Indicators {
    fn from(state: &PlayerState) -> Self {
        let playing = state.phase == TransportPhase::Playing;
        Self {
            equalizer_active: playing,
            artwork_spinning: playing,
            glow: playing,
            controls_busy: state.phase == TransportPhase::Loading,
            shuffle_highlighted: state.shuffle,
            loop_highlighted: state.loop_mode != LoopMode::Off,
            loop_one_badge: state.loop_mode == LoopMode::One,
            muted_icon: state.muted,
        }
    }
}
