use strum::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum TransportPhase {
    #[default]
    Paused,
    Playing,
    /// Simulated latency between a user action and its target phase.
    Loading,
}
