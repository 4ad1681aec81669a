use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    /// How long the Loading phase lasts before resolving.
    pub loading_delay: Duration,
    /// Percentage, clamped to 100.
    pub initial_volume: u8,
    pub navigation_overlap: NavigationOverlap,
    /// Fixed seed for shuffle selection. Seeded from entropy when unset.
    pub shuffle_seed: Option<u64>,
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loading_delay: Duration::from_millis(500),
            initial_volume: 75,
            navigation_overlap: NavigationOverlap::default(),
            shuffle_seed: None,
            event_capacity: 32,
        }
    }
}

/// What happens to next/previous requests that arrive while a loading
/// transition is still pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationOverlap {
    /// The request moves the cursor right away and the pending transition
    /// still applies its own step when it fires.
    #[default]
    Concurrent,
    /// The pending timer restarts and the request's step is folded into the
    /// pending transition, so the cursor moves once when it fires.
    Restart,
}
