//! Clip storage and time queries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;
use vedit_core::{ClipId, Result, TimeRange, TrackId, VeditError};

use crate::clip::{ensure_range, Clip, ClipSpec, ClipUpdate};
use crate::track::{TrackKind, TrackRegistry};

/// Clips active at one instant, in store order.
pub type ActiveClips<'a> = SmallVec<[&'a Clip; 4]>;

/// Every clip in the project, in insertion order.
///
/// Mutators take the track registry so that track existence and locks
/// are checked against live state. Clips on one track may overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipStore {
    clips: Vec<Clip>,
}

impl ClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clip on a live, unlocked track.
    pub fn add_clip(&mut self, tracks: &TrackRegistry, spec: ClipSpec) -> Result<ClipId> {
        tracks.require_unlocked(spec.track_id)?;
        let clip = spec.build()?;
        let id = clip.id;
        debug!(clip = %id, range = %clip.range(), "clip added");
        self.clips.push(clip);
        Ok(id)
    }

    /// Store an already-built clip (split, duplicate).
    pub(crate) fn insert(&mut self, tracks: &TrackRegistry, clip: Clip) -> Result<ClipId> {
        tracks.require_unlocked(clip.track_id)?;
        ensure_range(clip.start_time, clip.end_time)?;
        let id = clip.id;
        self.clips.push(clip);
        Ok(id)
    }

    /// Remove a clip. Removing an absent clip is a no-op returning `None`.
    pub fn remove_clip(&mut self, tracks: &TrackRegistry, id: ClipId) -> Result<Option<Clip>> {
        let Some(index) = self.index_of(id) else {
            return Ok(None);
        };
        if let Some(track) = tracks.get(self.clips[index].track_id) {
            track.ensure_unlocked()?;
        }
        Ok(Some(self.clips.remove(index)))
    }

    /// Merge `update` into a clip. Nothing changes on rejection.
    pub fn update_clip(
        &mut self,
        tracks: &TrackRegistry,
        id: ClipId,
        update: ClipUpdate,
    ) -> Result<&Clip> {
        let index = self
            .index_of(id)
            .ok_or_else(|| VeditError::not_found("Clip", id))?;
        let current = &self.clips[index];
        tracks.require_unlocked(current.track_id)?;
        if let Some(target) = update.track_id {
            if target != current.track_id {
                tracks.require_unlocked(target)?;
            }
        }
        let next = update.merged(current)?;
        self.clips[index] = next;
        Ok(&self.clips[index])
    }

    /// Put a clip back to a range it already held. Skips the lock check.
    /// Returns `false` if the clip is gone.
    pub(crate) fn restore_range(&mut self, id: ClipId, range: TimeRange) -> Result<bool> {
        ensure_range(range.start, range.end)?;
        let Some(clip) = self.clips.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        clip.start_time = range.start;
        clip.end_time = range.end;
        Ok(true)
    }

    /// Drop every clip on `track_id`, returning them in store order.
    pub(crate) fn remove_on_track(&mut self, track_id: TrackId) -> Vec<Clip> {
        let (removed, kept): (Vec<Clip>, Vec<Clip>) = std::mem::take(&mut self.clips)
            .into_iter()
            .partition(|c| c.track_id == track_id);
        self.clips = kept;
        removed
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Like [`get`](Self::get) but reports `NotFound`.
    pub fn require(&self, id: ClipId) -> Result<&Clip> {
        self.get(id).ok_or_else(|| VeditError::not_found("Clip", id))
    }

    pub fn contains(&self, id: ClipId) -> bool {
        self.get(id).is_some()
    }

    fn index_of(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id == id)
    }

    /// All clips with `start <= time <= end`, across all tracks.
    ///
    /// Both ends are inclusive, so a clip ending at `t` and one starting
    /// at `t` are both returned.
    // TODO: consider half-open `[start, end)` so back-to-back clips never
    // overlap at the shared instant.
    pub fn clips_at(&self, time: f64) -> ActiveClips<'_> {
        self.clips.iter().filter(|c| c.is_active_at(time)).collect()
    }

    pub fn clips_on_track(&self, track_id: TrackId) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.track_id == track_id)
    }

    /// The first clip in store order on `track_id` active at `time`.
    pub fn active_clip_on_track(&self, track_id: TrackId, time: f64) -> Option<&Clip> {
        self.clips
            .iter()
            .find(|c| c.track_id == track_id && c.is_active_at(time))
    }

    /// Latest end time over clips of `kind`.
    pub fn last_end_of_kind(&self, kind: TrackKind) -> Option<f64> {
        self.clips
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.end_time)
            .reduce(f64::max)
    }

    /// Latest end time over all clips, zero when empty.
    pub fn content_end(&self) -> f64 {
        self.clips.iter().map(|c| c.end_time).fold(0.0, f64::max)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clip> {
        self.clips.iter()
    }

    pub fn as_slice(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClipStore {
    type Item = &'a Clip;
    type IntoIter = std::slice::Iter<'a, Clip>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}
