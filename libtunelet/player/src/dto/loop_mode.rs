use strum::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum LoopMode {
    #[default]
    Off,
    All,
    One,
}

impl LoopMode {
    /// Off -> All -> One -> Off
    pub fn cycle(self) -> Self {
        match self {
            LoopMode::Off => LoopMode::All,
            LoopMode::All => LoopMode::One,
            LoopMode::One => LoopMode::Off,
        }
    }
}
