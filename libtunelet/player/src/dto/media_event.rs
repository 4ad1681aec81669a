#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report, in seconds.
    TimeUpdate(f64),
    /// Fired once per loaded source. The duration may be NaN or infinite for
    /// sources the port could not measure.
    MetadataLoaded { duration: f64 },
    Ended,
}
