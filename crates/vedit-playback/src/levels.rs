//! Volume and mute resolution for playback elements.

use smallvec::SmallVec;
use vedit_core::{Result, VeditError};
use vedit_timeline::{Timeline, Track};

use crate::element::ElementSlot;

/// Global output levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterLevels {
    /// Master volume (0.0 to 1.0).
    pub volume: f64,
    pub muted: bool,
}

impl Default for MasterLevels {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

impl MasterLevels {
    /// Set the master volume, clamped to `[0, 1]`. Raising the volume
    /// above zero also unmutes.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        if !volume.is_finite() {
            return Err(VeditError::InvalidParameter(format!(
                "master volume must be finite, got {volume}"
            )));
        }
        self.volume = volume.clamp(0.0, 1.0);
        if self.volume > 0.0 && self.muted {
            self.muted = false;
        }
        Ok(())
    }

    /// Flip the master mute. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

/// Levels pushed into one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLevels {
    /// Track gain times master volume. Not clamped: track gain may
    /// exceed one.
    pub volume: f64,
    pub muted: bool,
}

impl ElementLevels {
    pub fn for_track(track: &Track, master: &MasterLevels) -> Self {
        Self {
            volume: track.volume * master.volume,
            muted: track.muted || master.muted,
        }
    }

    /// Audible gain, zero when muted.
    pub fn effective_gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

/// Levels for every element with an active clip at `time`.
///
/// Tracks are visited in order and each contributes its first active
/// clip. When several tracks drive the same element, the later track
/// wins, so an element appears at most once.
pub fn resolve_levels(
    timeline: &Timeline,
    time: f64,
    master: &MasterLevels,
) -> SmallVec<[(ElementSlot, ElementLevels); 2]> {
    let mut out: SmallVec<[(ElementSlot, ElementLevels); 2]> = SmallVec::new();
    for track in timeline.tracks() {
        let Some(clip) = timeline.clips().active_clip_on_track(track.id, time) else {
            continue;
        };
        let Some(slot) = ElementSlot::for_kind(clip.kind) else {
            continue;
        };
        let levels = ElementLevels::for_track(track, master);
        match out.iter_mut().find(|(s, _)| *s == slot) {
            Some(entry) => entry.1 = levels,
            None => out.push((slot, levels)),
        }
    }
    out
}
