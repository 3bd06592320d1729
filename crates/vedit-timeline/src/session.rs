//! Editor session: the owned state of one open project.
//!
//! The session owns the timeline, the editing state, the history and the
//! gesture controller. Raw mutators change live state without touching
//! history. Discrete edits record exactly one snapshot each.

use tracing::{debug, info, warn};
use vedit_core::{ClipId, EditorConfig, Result, TimelineGeometry, TrackId, VeditError};

use crate::clip::{Clip, ClipSpec, ClipUpdate};
use crate::editing::{EditingState, TextOverlay, VideoTools};
use crate::export::RenderSnapshot;
use crate::gesture::{DragResizeController, GestureCommit, GestureKind, ResizeEdge};
use crate::history::{EditorSnapshot, HistoryManager};
use crate::import::{import_media, ImportOutcome, MediaImport};
use crate::project::Timeline;
use crate::split::{split_clip, SplitOutcome};
use crate::track::{TrackRegistry, TrackSpec, TrackUpdate};

/// Log expected rejections at `warn` and pass the result through.
fn surface<T>(op: &'static str, result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        if err.is_rejection() {
            warn!(op, %err, "edit rejected");
        }
        err
    })
}

/// State of one open project.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    project_name: String,
    timeline: Timeline,
    editing: EditingState,
    history: HistoryManager,
    gestures: DragResizeController,
    selected_clip: Option<ClipId>,
    /// Project duration in seconds
    duration: f64,
    zoom: f64,
}

impl EditorSession {
    /// Open a session with the two default tracks and a seeded history.
    pub fn new(config: EditorConfig) -> Self {
        let zoom = config.timeline.zoom.clamp(1.0);
        let mut session = Self {
            project_name: "Untitled Project".to_string(),
            timeline: Timeline::with_default_tracks(),
            editing: EditingState::default(),
            history: HistoryManager::new(config.history.max_entries),
            gestures: DragResizeController::new(config.editing.min_clip_duration),
            selected_clip: None,
            duration: config.playback.default_duration,
            zoom,
            config,
        };
        session
            .history
            .initialize(EditorSnapshot::capture("initial", &session.timeline, &session.editing));
        info!(
            tracks = session.timeline.tracks().len(),
            duration = session.duration,
            "editor session opened"
        );
        session
    }

    /// Close the session.
    pub fn shutdown(mut self) {
        if let Err(err) = self.gestures.abandon(&mut self.timeline) {
            warn!(%err, "failed to restore clip for abandoned gesture");
        }
        info!(
            project = %self.project_name,
            tracks = self.timeline.tracks().len(),
            clips = self.timeline.clips().len(),
            history = self.history.len(),
            "editor session closed"
        );
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn tracks(&self) -> &TrackRegistry {
        self.timeline.tracks()
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.timeline.clip(id)
    }

    pub fn editing(&self) -> &EditingState {
        &self.editing
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn selected_clip(&self) -> Option<ClipId> {
        self.selected_clip
    }

    /// Select a clip, or clear the selection with `None`.
    pub fn select_clip(&mut self, id: Option<ClipId>) -> Result<()> {
        if let Some(id) = id {
            self.timeline.clips().require(id)?;
        }
        self.selected_clip = id;
        Ok(())
    }

    /// Geometry of the main timeline at the current zoom and duration.
    pub fn geometry(&self) -> TimelineGeometry {
        TimelineGeometry::new(
            self.config.timeline.width_px,
            self.zoom,
            self.duration,
            self.config.timeline.zoom,
        )
    }

    /// Geometry of the overview strip.
    pub fn overview_geometry(&self) -> TimelineGeometry {
        TimelineGeometry::new(
            self.config.timeline.width_px,
            self.zoom,
            self.duration,
            self.config.timeline.overview_zoom,
        )
    }

    // ── View settings (not undoable) ────────────────────────────

    pub fn set_duration(&mut self, seconds: f64) -> Result<()> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(VeditError::InvalidParameter(format!(
                "duration must be positive, got {seconds}"
            )));
        }
        self.duration = seconds;
        Ok(())
    }

    /// Set the zoom factor, clamped to the main range. Returns the value
    /// actually applied.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = self.config.timeline.zoom.clamp(zoom);
        self.zoom
    }

    /// Step the zoom by `step`, clamped.
    pub fn zoom_by(&mut self, step: f64) -> f64 {
        self.set_zoom(self.zoom + step)
    }

    // ── Raw mutators (no history) ───────────────────────────────

    pub fn add_clip(&mut self, spec: ClipSpec) -> Result<ClipId> {
        surface("add_clip", self.timeline.add_clip(spec))
    }

    pub fn update_clip(&mut self, id: ClipId, update: ClipUpdate) -> Result<()> {
        surface("update_clip", self.timeline.update_clip(id, update).map(|_| ()))
    }

    pub fn remove_clip(&mut self, id: ClipId) -> Result<Option<Clip>> {
        let removed = surface("remove_clip", self.timeline.remove_clip(id))?;
        if removed.is_some() && self.selected_clip == Some(id) {
            self.selected_clip = None;
        }
        Ok(removed)
    }

    pub fn update_track(&mut self, id: TrackId, update: TrackUpdate) -> Result<()> {
        surface("update_track", self.timeline.update_track(id, update))
    }

    pub fn set_adjustment(&mut self, key: impl Into<String>, value: f64) {
        self.editing.adjustments.insert(key.into(), value);
    }

    pub fn set_active_filters(&mut self, filters: Vec<String>) {
        self.editing.active_filters = filters;
    }

    pub fn set_active_effects(&mut self, effects: Vec<String>) {
        self.editing.active_effects = effects;
    }

    pub fn set_video_tools(&mut self, tools: VideoTools) {
        self.editing.video_tools = tools;
    }

    pub fn set_text_overlays(&mut self, overlays: Vec<TextOverlay>) {
        self.editing.text_overlays = overlays;
    }

    /// Record the live state as one undo step.
    ///
    /// For callers composing raw mutators, and for continuous controls on
    /// release. Refused while a gesture holds a clip mid-edit.
    pub fn commit(&mut self, label: impl Into<String>) -> Result<()> {
        surface("commit", self.ensure_idle())?;
        self.record(label);
        Ok(())
    }

    fn record(&mut self, label: impl Into<String>) {
        self.history
            .save(EditorSnapshot::capture(label, &self.timeline, &self.editing));
    }

    // ── Discrete edits (one snapshot each) ──────────────────────

    pub fn add_track(&mut self, spec: TrackSpec) -> Result<TrackId> {
        surface("add_track", self.ensure_idle())?;
        let id = surface("add_track", self.timeline.add_track(spec))?;
        self.record("add track");
        info!(track = %id, "track added");
        Ok(id)
    }

    /// Remove a track and its clips.
    pub fn remove_track(&mut self, id: TrackId) -> Result<Vec<Clip>> {
        surface("remove_track", self.ensure_idle())?;
        let (_, clips) = surface("remove_track", self.timeline.remove_track(id))?;
        self.drop_dangling_selection();
        self.record("remove track");
        Ok(clips)
    }

    /// Duplicate a track and its clips. The copy is unlocked.
    pub fn duplicate_track(&mut self, id: TrackId) -> Result<TrackId> {
        surface("duplicate_track", self.ensure_idle())?;
        let copy = surface("duplicate_track", self.timeline.duplicate_track(id))?;
        self.record("duplicate track");
        info!(source = %id, track = %copy, "track duplicated");
        Ok(copy)
    }

    /// Delete a clip. Deleting an absent clip records nothing.
    pub fn delete_clip(&mut self, id: ClipId) -> Result<Option<Clip>> {
        surface("delete_clip", self.ensure_idle())?;
        let removed = self.remove_clip(id)?;
        if removed.is_some() {
            self.record("delete clip");
        }
        Ok(removed)
    }

    /// Copy a clip to just after its own end.
    pub fn duplicate_clip(&mut self, id: ClipId) -> Result<ClipId> {
        surface("duplicate_clip", self.ensure_idle())?;
        let source = surface("duplicate_clip", self.timeline.clips().require(id))?;
        let start = source.end_time + self.config.editing.duplicate_gap;
        let copy = Clip {
            name: format!("{} (Copy)", source.name),
            start_time: start,
            end_time: start + source.duration(),
            ..source.copy_with_new_id()
        };
        let copy_id = surface("duplicate_clip", self.timeline.insert_clip(copy))?;
        self.selected_clip = Some(copy_id);
        self.record("duplicate clip");
        Ok(copy_id)
    }

    /// Split a clip at `at` seconds.
    pub fn split_clip(&mut self, id: ClipId, at: f64) -> Result<SplitOutcome> {
        surface("split_clip", self.ensure_idle())?;
        let outcome = surface("split_clip", split_clip(&mut self.timeline, id, at))?;
        self.record("split clip");
        Ok(outcome)
    }

    /// Split a clip where the pointer clicked in cut mode. Returns the
    /// outcome and the cut time, where the playhead should move.
    pub fn cut_at_pixel(&mut self, id: ClipId, pointer_x: f64) -> Result<(SplitOutcome, f64)> {
        let at = self.geometry().pixel_to_time(pointer_x);
        self.split_clip(id, at).map(|outcome| (outcome, at))
    }

    /// Import a batch of media as one undo step. An empty batch records
    /// nothing.
    pub fn import_media(&mut self, items: Vec<MediaImport>) -> Result<ImportOutcome> {
        surface("import_media", self.ensure_idle())?;
        let outcome = surface(
            "import_media",
            import_media(&mut self.timeline, &self.config.import, items),
        )?;
        if !outcome.clips.is_empty() || outcome.created_tracks {
            self.record("import media");
        }
        Ok(outcome)
    }

    // ── Gestures ────────────────────────────────────────────────

    pub fn gesture_active(&self) -> bool {
        self.gestures.is_active()
    }

    /// Start dragging a clip grabbed at `pointer_x`. Selects the clip.
    pub fn begin_move(&mut self, id: ClipId, pointer_x: f64) -> Result<()> {
        let geometry = self.geometry();
        surface(
            "begin_move",
            self.gestures.begin_move(&self.timeline, id, pointer_x, geometry),
        )?;
        self.selected_clip = Some(id);
        Ok(())
    }

    pub fn begin_resize(&mut self, id: ClipId, edge: ResizeEdge) -> Result<()> {
        let geometry = self.geometry();
        surface(
            "begin_resize",
            self.gestures.begin_resize(&self.timeline, id, edge, geometry),
        )?;
        self.selected_clip = Some(id);
        Ok(())
    }

    /// Feed a pointer position to the active gesture.
    pub fn update_gesture(&mut self, pointer_x: f64) -> Result<()> {
        self.gestures.update(&mut self.timeline, pointer_x)?;
        Ok(())
    }

    /// Release the pointer. Records one snapshot if the clip changed.
    pub fn end_gesture(&mut self) -> Option<GestureCommit> {
        let commit = self.gestures.commit()?;
        let label = match commit.kind {
            GestureKind::Move => "move clip",
            GestureKind::Resize(_) => "resize clip",
        };
        self.record(label);
        Some(commit)
    }

    /// Cancel the active gesture without recording history.
    pub fn abandon_gesture(&mut self) -> Result<()> {
        self.gestures.abandon(&mut self.timeline)
    }

    /// History-recording edits wait until the gesture ends, so no
    /// snapshot holds a clip mid-drag.
    fn ensure_idle(&self) -> Result<()> {
        if self.gestures.is_active() {
            Err(VeditError::GestureActive)
        } else {
            Ok(())
        }
    }

    // ── Undo / redo ─────────────────────────────────────────────

    /// Restore the previous snapshot. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.abandon_for_history();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.timeline = snapshot.timeline.clone();
        self.editing = snapshot.editing.clone();
        self.drop_dangling_selection();
        true
    }

    /// Restore the next snapshot. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        self.abandon_for_history();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.timeline = snapshot.timeline.clone();
        self.editing = snapshot.editing.clone();
        self.drop_dangling_selection();
        true
    }

    fn abandon_for_history(&mut self) {
        if self.gestures.is_active() {
            debug!("abandoning gesture before history step");
            if let Err(err) = self.gestures.abandon(&mut self.timeline) {
                warn!(%err, "failed to restore clip for abandoned gesture");
            }
        }
    }

    fn drop_dangling_selection(&mut self) {
        if let Some(id) = self.selected_clip {
            if !self.timeline.clips().contains(id) {
                self.selected_clip = None;
            }
        }
    }

    // ── Export ──────────────────────────────────────────────────

    /// Consistent read-only copy for the render service.
    pub fn export_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::new(
            self.project_name.clone(),
            self.duration,
            self.timeline.tracks().as_slice().to_vec(),
            self.timeline.clips().as_slice().to_vec(),
        )
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
