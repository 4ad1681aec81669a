use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use thiserror::Error;

use crate::dto::track::Track;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("A playlist needs at least one track")]
    Empty,
    #[error("Track id {0} appears more than once")]
    DuplicateId(u32),
}

/// Fixed, ordered, non-empty track list. Cloning shares the underlying
/// tracks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    tracks: Arc<[Track]>,
}

static BUNDLED: [(u32, &str, &str, &str); 10] = [
    (
        1,
        "/music/Tersirat di Balik Senyuman - Brunetta Gondola.mp3",
        "Tersirat di Balik Senyuman",
        "Brunetta Gondola",
    ),
    (
        2,
        "/music/ポモドーロ・ラブ - 真道もも (Pomodoro LOVE! - Mado Momo) - HMS.mp3",
        "ポモドーロ・ラブ - 真道もも (Pomodoro LOVE! - Mado Momo)",
        "真道もも (Mado Momo)",
    ),
    (
        3,
        "/music/Nur Wenn Ich Will (AI-Prinz) - HMS.mp3",
        "Nur Wenn Ich Will (AI-Prinz)",
        "HMS",
    ),
    (
        4,
        "/music/🔥 _I Am the Dream Dreaming Me_ - HMS.mp3",
        "🔥 _I Am the Dream Dreaming Me_ ",
        "HMS",
    ),
    (
        5,
        "/music/「冬の神話 (Fuyu no Shinwa) — Winter Myth」 - HMS.mp3",
        "「冬の神話 (Fuyu no Shinwa) — Winter Myth」",
        "HMS",
    ),
    (6, "/music/A Morning Hum - HMS.mp3", "A Morning Hum", "HMS"),
    (
        7,
        "/music/🌸 花の香りに (Hana no Kaori ni) 🌸 Glam Rock Live.mp3",
        "🌸 花の香りに (Hana no Kaori ni) 🌸 Glam Rock Live",
        "差乃間・ミッチ",
    ),
    (
        8,
        "/music/A Morning Hum (Remix) - HMS.mp3",
        "A Morning Hum (Remix)",
        "HMS",
    ),
    (
        9,
        "/music/🌸 花の香りに (Hana no Kaori ni) 🌸 - 花野かおり.mp3",
        "🌸 花の香りに (Hana no Kaori ni) 🌸",
        "花野かおり",
    ),
    (10, "/music/Debugin Hidup - HMS.mp3", "Debugin Hidup", "HMS"),
];

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        let mut ids = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !ids.insert(track.id) {
                return Err(PlaylistError::DuplicateId(track.id));
            }
        }
        Ok(Self {
            tracks: tracks.into(),
        })
    }

    /// The track list shipped with the widget.
    pub fn bundled() -> Self {
        Self {
            tracks: BUNDLED
                .iter()
                .map(|(id, source, title, artist)| Track::new(*id, *source, *title, *artist))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false, construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.tracks.len() - 1
    }

    pub(crate) fn track(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }

    /// Moves `step` positions from `index`, wrapping in both directions.
    pub fn offset(&self, index: usize, step: isize) -> usize {
        let len = self.tracks.len() as isize;
        (index as isize + step).rem_euclid(len) as usize
    }

    /// Uniformly picks an index other than `index`. Returns `index` unchanged
    /// for single-track playlists.
    pub fn random_other<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> usize {
        let len = self.tracks.len();
        if len < 2 {
            return index;
        }
        let pick = rng.gen_range(0..len - 1);
        if pick >= index { pick + 1 } else { pick }
    }
}
