use super::loop_mode::LoopMode;
use super::track::Track;
use super::transport_phase::TransportPhase;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub phase: TransportPhase,
    pub track_index: usize,
    pub track: Track,
    pub current_time: f64,
    /// Zero until the port reports a usable duration.
    pub duration: f64,
    /// Always within `0.0..=100.0`.
    pub progress: f64,
    /// Percentage, `0..=100`.
    pub volume: u8,
    pub muted: bool,
    pub loop_mode: LoopMode,
    pub shuffle: bool,
}

impl PlayerState {
    pub fn native_volume(&self) -> f64 {
        f64::from(self.volume) / 100.0
    }

    pub fn is_loading(&self) -> bool {
        self.phase == TransportPhase::Loading
    }
}
