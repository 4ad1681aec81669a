#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub id: u32,
    /// URI or path handed to the playback port as-is.
    pub source: String,
    pub title: String,
    pub artist: String,
}

impl Track {
    pub fn new(
        id: u32,
        source: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            title: title.into(),
            artist: artist.into(),
        }
    }
}
