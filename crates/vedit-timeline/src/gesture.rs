//! Pointer-driven move and resize of a single clip.
//!
//! A gesture runs `begin_* -> update* -> commit | abandon`. Updates write
//! the clip's times directly and never touch history; the session records
//! one snapshot when a gesture commits with a net change.

use tracing::debug;
use vedit_core::{ClipId, Result, TimeRange, TimelineGeometry, VeditError};

use crate::clip::ClipUpdate;
use crate::project::Timeline;

/// Which edge of a clip is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
}

/// What the active gesture does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Shift both ends, preserving duration.
    Move,
    /// Move one edge, keeping the other fixed.
    Resize(ResizeEdge),
}

/// Result of a gesture that changed its clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureCommit {
    pub clip_id: ClipId,
    pub kind: GestureKind,
    pub before: TimeRange,
    pub after: TimeRange,
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    clip_id: ClipId,
    kind: GestureKind,
    /// Geometry captured at begin; zoom changes mid-gesture are ignored.
    geometry: TimelineGeometry,
    origin: TimeRange,
    current: TimeRange,
    /// Pointer distance from the clip's left edge, in pixels.
    grab_offset_px: f64,
}

/// Single-pointer drag/resize state machine.
#[derive(Debug, Clone)]
pub struct DragResizeController {
    active: Option<ActiveGesture>,
    min_duration: f64,
}

impl DragResizeController {
    /// Create an idle controller enforcing `min_duration` on resizes.
    pub fn new(min_duration: f64) -> Self {
        Self {
            active: None,
            min_duration: min_duration.max(0.0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Clip under the active gesture, if any.
    pub fn active_clip(&self) -> Option<ClipId> {
        self.active.as_ref().map(|g| g.clip_id)
    }

    pub fn active_kind(&self) -> Option<GestureKind> {
        self.active.as_ref().map(|g| g.kind)
    }

    pub fn min_duration(&self) -> f64 {
        self.min_duration
    }

    /// Start moving `clip_id`, grabbed at `pointer_x`.
    pub fn begin_move(
        &mut self,
        timeline: &Timeline,
        clip_id: ClipId,
        pointer_x: f64,
        geometry: TimelineGeometry,
    ) -> Result<()> {
        let origin = self.check_begin(timeline, clip_id)?;
        self.active = Some(ActiveGesture {
            clip_id,
            kind: GestureKind::Move,
            geometry,
            origin,
            current: origin,
            grab_offset_px: pointer_x - geometry.time_to_pixel(origin.start),
        });
        debug!(clip = %clip_id, "move gesture started");
        Ok(())
    }

    /// Start resizing `clip_id` from `edge`.
    pub fn begin_resize(
        &mut self,
        timeline: &Timeline,
        clip_id: ClipId,
        edge: ResizeEdge,
        geometry: TimelineGeometry,
    ) -> Result<()> {
        let origin = self.check_begin(timeline, clip_id)?;
        self.active = Some(ActiveGesture {
            clip_id,
            kind: GestureKind::Resize(edge),
            geometry,
            origin,
            current: origin,
            grab_offset_px: 0.0,
        });
        debug!(clip = %clip_id, ?edge, "resize gesture started");
        Ok(())
    }

    fn check_begin(&self, timeline: &Timeline, clip_id: ClipId) -> Result<TimeRange> {
        if self.active.is_some() {
            return Err(VeditError::GestureActive);
        }
        let clip = timeline
            .clip(clip_id)
            .ok_or_else(|| VeditError::not_found("Clip", clip_id))?;
        timeline.tracks().require_unlocked(clip.track_id)?;
        Ok(clip.range())
    }

    /// Range a pointer position maps to under the active gesture.
    fn target_range(&self, gesture: &ActiveGesture, pointer_x: f64) -> TimeRange {
        let geo = &gesture.geometry;
        let TimeRange { start, end } = gesture.origin;
        match gesture.kind {
            GestureKind::Move => {
                let new_start = geo
                    .pixel_delta_to_time(pointer_x - gesture.grab_offset_px)
                    .max(0.0);
                TimeRange::new(new_start, new_start + (end - start))
            }
            GestureKind::Resize(ResizeEdge::Left) => {
                let max_start = (end - self.min_duration).max(0.0);
                let t = geo.pixel_to_time_unclamped(pointer_x);
                let t = if t.is_nan() { start } else { t };
                TimeRange::new(t.clamp(0.0, max_start), end)
            }
            GestureKind::Resize(ResizeEdge::Right) => {
                let t = geo.pixel_to_time_unclamped(pointer_x);
                let t = if t.is_nan() { end } else { t };
                TimeRange::new(start, t.max(start + self.min_duration))
            }
        }
    }

    /// Apply a pointer position. Returns the clip's new range, or `None`
    /// when no gesture is active.
    pub fn update(&mut self, timeline: &mut Timeline, pointer_x: f64) -> Result<Option<TimeRange>> {
        let Some(gesture) = self.active.as_ref() else {
            return Ok(None);
        };
        let next = self.target_range(gesture, pointer_x);
        let clip_id = gesture.clip_id;
        timeline.update_clip(clip_id, ClipUpdate::new().times(next.start, next.end))?;
        if let Some(gesture) = self.active.as_mut() {
            gesture.current = next;
        }
        Ok(Some(next))
    }

    /// Finish the gesture. Returns the change to record, or `None` when
    /// idle or when the clip ended where it started.
    pub fn commit(&mut self) -> Option<GestureCommit> {
        let gesture = self.active.take()?;
        if gesture.current == gesture.origin {
            debug!(clip = %gesture.clip_id, "gesture finished without change");
            return None;
        }
        Some(GestureCommit {
            clip_id: gesture.clip_id,
            kind: gesture.kind,
            before: gesture.origin,
            after: gesture.current,
        })
    }

    /// Cancel the gesture and put the clip back where it started, even if
    /// its track was locked in the meantime.
    pub fn abandon(&mut self, timeline: &mut Timeline) -> Result<()> {
        let Some(gesture) = self.active.take() else {
            return Ok(());
        };
        if gesture.current != gesture.origin {
            timeline.restore_clip_range(gesture.clip_id, gesture.origin)?;
        }
        debug!(clip = %gesture.clip_id, "gesture abandoned");
        Ok(())
    }
}

impl Default for DragResizeController {
    fn default() -> Self {
        Self::new(vedit_core::defaults::MIN_CLIP_DURATION)
    }
}

/// Hit test a pointer against a clip's resize handles.
///
/// Returns the edge whose `handle_px`-wide strip contains `pointer_x`, or
/// `None` when the pointer is outside both handles.
pub fn hit_test_edge(
    range: TimeRange,
    geometry: &TimelineGeometry,
    pointer_x: f64,
    handle_px: f64,
) -> Option<ResizeEdge> {
    let left = geometry.time_to_pixel(range.start);
    let right = geometry.time_to_pixel(range.end);
    if pointer_x < left || pointer_x > right {
        return None;
    }
    if pointer_x <= left + handle_px {
        Some(ResizeEdge::Left)
    } else if pointer_x >= right - handle_px {
        Some(ResizeEdge::Right)
    } else {
        None
    }
}
