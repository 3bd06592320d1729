//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vedit_core::{Color, Result, TrackId, VeditError};

/// Loudest track gain accepted.
pub const MAX_TRACK_VOLUME: f64 = 2.0;

/// Kind of lane, shared by tracks and the clips placed on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Image,
}

impl TrackKind {
    /// Label color used when a spec does not pick one.
    pub fn default_color(self) -> Color {
        match self {
            Self::Video => Color::BLUE,
            Self::Audio => Color::GREEN,
            Self::Text => Color::PURPLE,
            Self::Image => Color::ORANGE,
        }
    }

    /// True for kinds that drive a playback element.
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Video | Self::Audio)
    }
}

/// A lane holding clips of a declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Is track muted
    pub muted: bool,
    /// Is track locked (prevent edits)
    pub locked: bool,
    /// Track gain in `[0, 2]`
    pub volume: f64,
    /// Label color
    pub color: Color,
}

impl Track {
    /// Create an unlocked, unmuted track at unity gain.
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            kind,
            muted: false,
            locked: false,
            volume: 1.0,
            color: kind.default_color(),
        }
    }

    /// Fail with `LockedTrack` when the track refuses edits.
    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            Err(VeditError::LockedTrack(self.id))
        } else {
            Ok(())
        }
    }
}

/// Everything needed to create a track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSpec {
    pub name: String,
    pub kind: TrackKind,
    pub color: Option<Color>,
    pub volume: f64,
    pub muted: bool,
    pub locked: bool,
}

impl TrackSpec {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: None,
            volume: 1.0,
            muted: false,
            locked: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

/// Partial track update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackUpdate {
    pub name: Option<String>,
    pub kind: Option<TrackKind>,
    pub muted: Option<bool>,
    pub locked: Option<bool>,
    pub volume: Option<f64>,
    pub color: Option<Color>,
}

impl TrackUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: TrackKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = Some(muted);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Structural changes are refused on a locked track.
    fn is_structural(&self) -> bool {
        self.kind.is_some()
    }
}

fn checked_volume(volume: f64) -> Result<f64> {
    if volume.is_finite() {
        Ok(volume.clamp(0.0, MAX_TRACK_VOLUME))
    } else {
        Err(VeditError::InvalidParameter(format!(
            "track volume must be finite, got {volume}"
        )))
    }
}

/// Ordered collection of tracks.
///
/// Insertion order is meaningful: default tracks are picked by kind in
/// the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new track built from `spec`.
    pub fn add_track(&mut self, spec: TrackSpec) -> Result<TrackId> {
        let volume = checked_volume(spec.volume)?;
        let mut track = Track::new(spec.name, spec.kind);
        track.volume = volume;
        track.muted = spec.muted;
        track.locked = spec.locked;
        if let Some(color) = spec.color {
            track.color = color;
        }
        let id = track.id;
        debug!(track = %id, kind = ?track.kind, "track added");
        self.tracks.push(track);
        Ok(id)
    }

    /// Append an already-built track (duplication).
    pub(crate) fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove a track. The caller cascades clip removal.
    ///
    /// Refuses unknown ids, locked tracks and the last remaining track.
    pub fn remove_track(&mut self, id: TrackId) -> Result<Track> {
        let index = self
            .index_of(id)
            .ok_or_else(|| VeditError::not_found("Track", id))?;
        self.tracks[index].ensure_unlocked()?;
        if self.tracks.len() == 1 {
            return Err(VeditError::LastTrack);
        }
        Ok(self.tracks.remove(index))
    }

    /// Merge `update` into a track. All fields are validated before any
    /// is written.
    pub fn update_track(&mut self, id: TrackId, update: TrackUpdate) -> Result<()> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| VeditError::not_found("Track", id))?;

        if track.locked && update.is_structural() {
            return Err(VeditError::LockedTrack(id));
        }
        let volume = update.volume.map(checked_volume).transpose()?;

        if let Some(name) = update.name {
            track.name = name;
        }
        if let Some(kind) = update.kind {
            track.kind = kind;
        }
        if let Some(muted) = update.muted {
            track.muted = muted;
        }
        if let Some(locked) = update.locked {
            track.locked = locked;
        }
        if let Some(volume) = volume {
            track.volume = volume;
        }
        if let Some(color) = update.color {
            track.color = color;
        }
        Ok(())
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Like [`get`](Self::get) but reports `NotFound`.
    pub fn require(&self, id: TrackId) -> Result<&Track> {
        self.get(id).ok_or_else(|| VeditError::not_found("Track", id))
    }

    /// Look up a track that must exist and accept edits.
    pub fn require_unlocked(&self, id: TrackId) -> Result<&Track> {
        let track = self.require(id)?;
        track.ensure_unlocked()?;
        Ok(track)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Track at an insertion-order position.
    pub fn nth(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// First track of `kind` in insertion order.
    pub fn first_of_kind(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl<'a> IntoIterator for &'a TrackRegistry {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
