//! Cutting one clip into two.
//!
//! Every cut flow (cut at the playhead, a click in cut mode, the context
//! menu) reduces to [`split_clip`].

use tracing::debug;
use vedit_core::{ClipId, Result, VeditError};

use crate::clip::{Clip, ClipUpdate};
use crate::project::Timeline;

/// Ids of the two halves of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The original clip, now ending at the cut
    pub original: ClipId,
    /// The new clip, starting at the cut
    pub created: ClipId,
}

/// Split `clip_id` at `at`, which must lie strictly inside the clip.
///
/// The original keeps `[start, at]`; a new clip takes `[at, end]` with a
/// deep copy of the payload and the name suffixed `" (2)"`. The new clip
/// is appended to the store. Nothing is mutated on failure.
pub fn split_clip(timeline: &mut Timeline, clip_id: ClipId, at: f64) -> Result<SplitOutcome> {
    let clip = timeline
        .clip(clip_id)
        .ok_or_else(|| VeditError::not_found("Clip", clip_id))?;
    timeline.tracks().require_unlocked(clip.track_id)?;
    if !(at > clip.start_time && at < clip.end_time) {
        return Err(VeditError::InvalidSplitPoint {
            at,
            start: clip.start_time,
            end: clip.end_time,
        });
    }

    let created = Clip {
        name: format!("{} (2)", clip.name),
        start_time: at,
        ..clip.copy_with_new_id()
    };
    let created_id = created.id;

    // Both halves are valid and the track is unlocked; neither write fails.
    timeline.update_clip(clip_id, ClipUpdate::new().end(at))?;
    timeline.insert_clip(created)?;
    debug!(clip = %clip_id, created = %created_id, at, "clip split");

    Ok(SplitOutcome {
        original: clip_id,
        created: created_id,
    })
}
