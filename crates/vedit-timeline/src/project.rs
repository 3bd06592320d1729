//! The timeline: tracks plus the clips placed on them.

use serde::{Deserialize, Serialize};
use tracing::info;
use vedit_core::{ClipId, Color, Result, TimeRange, TrackId};

use crate::clip::{Clip, ClipSpec, ClipUpdate};
use crate::store::{ActiveClips, ClipStore};
use crate::track::{Track, TrackKind, TrackRegistry, TrackSpec, TrackUpdate};

/// Tracks and clips kept consistent with each other.
///
/// Every clip references a live track; removing a track removes its
/// clips with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    tracks: TrackRegistry,
    clips: ClipStore,
}

impl Timeline {
    /// An empty timeline with no tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline with one video and one audio track.
    pub fn with_default_tracks() -> Self {
        let mut timeline = Self::new();
        timeline.push_default_tracks();
        timeline
    }

    /// Append "Video Track 1" and "Audio Track 1".
    pub(crate) fn push_default_tracks(&mut self) -> (TrackId, TrackId) {
        let video = Track {
            color: Color::BLUE,
            ..Track::new("Video Track 1", TrackKind::Video)
        };
        let audio = Track {
            color: Color::GREEN,
            ..Track::new("Audio Track 1", TrackKind::Audio)
        };
        let ids = (video.id, audio.id);
        self.tracks.push(video);
        self.tracks.push(audio);
        ids
    }

    pub fn tracks(&self) -> &TrackRegistry {
        &self.tracks
    }

    pub fn clips(&self) -> &ClipStore {
        &self.clips
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id)
    }

    // ── Tracks ──────────────────────────────────────────────────

    pub fn add_track(&mut self, spec: TrackSpec) -> Result<TrackId> {
        self.tracks.add_track(spec)
    }

    /// Remove a track and every clip on it.
    pub fn remove_track(&mut self, id: TrackId) -> Result<(Track, Vec<Clip>)> {
        let track = self.tracks.remove_track(id)?;
        let clips = self.clips.remove_on_track(id);
        info!(track = %id, clips = clips.len(), "track removed");
        Ok((track, clips))
    }

    pub fn update_track(&mut self, id: TrackId, update: TrackUpdate) -> Result<()> {
        self.tracks.update_track(id, update)
    }

    /// Append a copy of a track and its clips under fresh ids.
    pub(crate) fn duplicate_track(&mut self, id: TrackId) -> Result<TrackId> {
        let source = self.tracks.require(id)?;
        let copy = Track {
            id: TrackId::new(),
            name: format!("{} (Copy)", source.name),
            locked: false,
            ..source.clone()
        };
        let copy_id = copy.id;
        let clips: Vec<Clip> = self
            .clips
            .clips_on_track(id)
            .map(|clip| Clip {
                track_id: copy_id,
                name: format!("{} (Copy)", clip.name),
                ..clip.copy_with_new_id()
            })
            .collect();
        self.tracks.push(copy);
        for clip in clips {
            self.clips.insert(&self.tracks, clip)?;
        }
        Ok(copy_id)
    }

    // ── Clips ───────────────────────────────────────────────────

    pub fn add_clip(&mut self, spec: ClipSpec) -> Result<ClipId> {
        self.clips.add_clip(&self.tracks, spec)
    }

    pub(crate) fn insert_clip(&mut self, clip: Clip) -> Result<ClipId> {
        self.clips.insert(&self.tracks, clip)
    }

    pub fn update_clip(&mut self, id: ClipId, update: ClipUpdate) -> Result<&Clip> {
        self.clips.update_clip(&self.tracks, id, update)
    }

    pub(crate) fn restore_clip_range(&mut self, id: ClipId, range: TimeRange) -> Result<bool> {
        self.clips.restore_range(id, range)
    }

    pub fn remove_clip(&mut self, id: ClipId) -> Result<Option<Clip>> {
        self.clips.remove_clip(&self.tracks, id)
    }

    pub fn clips_at(&self, time: f64) -> ActiveClips<'_> {
        self.clips.clips_at(time)
    }
}
