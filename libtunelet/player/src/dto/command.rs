use super::media_event::MediaEvent;

#[derive(Clone, Debug)]
pub(crate) enum Command {
    TogglePlay,
    Next,
    Previous,
    Seek(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleLoop,
    ToggleShuffle,
    Media(MediaEvent),
    LoadingElapsed(u64),
    GetCurrentStatus,
    Shutdown,
}
