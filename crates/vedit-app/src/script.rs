//! JSON edit scripts.
//!
//! A script is a list of steps replayed against a fresh session. Clips
//! and tracks are addressed by their current index, so a step sees the
//! state left by the steps before it.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use vedit_core::{ClipId, TrackId, VeditError};
use vedit_timeline::{
    EditorSession, MediaImport, ResizeEdge, TrackKind, TrackSpec, TrackUpdate,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub project_name: Option<String>,
    /// Project duration in seconds
    pub duration: Option<f64>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    pub name: String,
    pub kind: TrackKind,
    pub url: String,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
}

impl From<Edge> for ResizeEdge {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Left => ResizeEdge::Left,
            Edge::Right => ResizeEdge::Right,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Import {
        items: Vec<ImportItem>,
    },
    AddTrack {
        name: String,
        kind: TrackKind,
    },
    RemoveTrack {
        track: usize,
    },
    DuplicateTrack {
        track: usize,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTrack {
        track: usize,
        muted: Option<bool>,
        locked: Option<bool>,
        volume: Option<f64>,
    },
    Split {
        clip: usize,
        at: f64,
    },
    Duplicate {
        clip: usize,
    },
    Delete {
        clip: usize,
    },
    /// Drag a clip so its start lands on `to` seconds.
    Move {
        clip: usize,
        to: f64,
    },
    /// Drag one edge of a clip to `to` seconds.
    Resize {
        clip: usize,
        edge: Edge,
        to: f64,
    },
    Adjust {
        key: String,
        value: f64,
    },
    Zoom {
        level: f64,
    },
    Undo,
    Redo,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("failed to parse script {}", path.display()))
    }
}

fn clip_at(session: &EditorSession, index: usize) -> Result<ClipId> {
    session
        .timeline()
        .clips()
        .as_slice()
        .get(index)
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("no clip at index {index}"))
}

fn track_at(session: &EditorSession, index: usize) -> Result<TrackId> {
    session
        .tracks()
        .nth(index)
        .map(|t| t.id)
        .ok_or_else(|| anyhow!("no track at index {index}"))
}

/// Apply one step.
pub fn apply(session: &mut EditorSession, step: &ScriptStep) -> vedit_core::Result<()> {
    match step {
        ScriptStep::Import { items } => {
            let imports = items
                .iter()
                .map(|item| {
                    let import = MediaImport::new(&item.name, item.kind, &item.url);
                    match item.duration {
                        Some(d) => import.with_duration(d),
                        None => import,
                    }
                })
                .collect();
            session.import_media(imports)?;
        }
        ScriptStep::AddTrack { name, kind } => {
            session.add_track(TrackSpec::new(name, *kind))?;
        }
        ScriptStep::RemoveTrack { track } => {
            let id = resolve(track_at(session, *track))?;
            session.remove_track(id)?;
        }
        ScriptStep::DuplicateTrack { track } => {
            let id = resolve(track_at(session, *track))?;
            session.duplicate_track(id)?;
        }
        ScriptStep::UpdateTrack {
            track,
            muted,
            locked,
            volume,
        } => {
            let id = resolve(track_at(session, *track))?;
            let mut update = TrackUpdate::new();
            if let Some(muted) = muted {
                update = update.muted(*muted);
            }
            if let Some(locked) = locked {
                update = update.locked(*locked);
            }
            if let Some(volume) = volume {
                update = update.volume(*volume);
            }
            session.update_track(id, update)?;
            session.commit("update track")?;
        }
        ScriptStep::Split { clip, at } => {
            let id = resolve(clip_at(session, *clip))?;
            session.split_clip(id, *at)?;
        }
        ScriptStep::Duplicate { clip } => {
            let id = resolve(clip_at(session, *clip))?;
            session.duplicate_clip(id)?;
        }
        ScriptStep::Delete { clip } => {
            let id = resolve(clip_at(session, *clip))?;
            session.delete_clip(id)?;
        }
        ScriptStep::Move { clip, to } => {
            let id = resolve(clip_at(session, *clip))?;
            let start = session.clip(id).map(|c| c.start_time).unwrap_or_default();
            let geometry = session.geometry();
            let from_x = geometry.time_to_pixel(start);
            let to_x = from_x + (to - start) * geometry.pixels_per_second();
            session.begin_move(id, from_x)?;
            drag_to(session, to_x)?;
        }
        ScriptStep::Resize { clip, edge, to } => {
            let id = resolve(clip_at(session, *clip))?;
            let x = session.geometry().time_to_pixel(*to);
            session.begin_resize(id, (*edge).into())?;
            drag_to(session, x)?;
        }
        ScriptStep::Adjust { key, value } => {
            session.set_adjustment(key.clone(), *value);
            session.commit(format!("adjust {key}"))?;
        }
        ScriptStep::Zoom { level } => {
            session.set_zoom(*level);
        }
        ScriptStep::Undo => {
            session.undo();
        }
        ScriptStep::Redo => {
            session.redo();
        }
    }
    Ok(())
}

/// Finish a gesture at `x`. A rejected update abandons the gesture so
/// later steps are not blocked by it.
fn drag_to(session: &mut EditorSession, x: f64) -> vedit_core::Result<()> {
    if let Err(err) = session.update_gesture(x) {
        session.abandon_gesture()?;
        return Err(err);
    }
    session.end_gesture();
    Ok(())
}

fn resolve<T>(lookup: Result<T>) -> vedit_core::Result<T> {
    lookup.map_err(|e| VeditError::InvalidParameter(e.to_string()))
}

/// Replay a script. Rejected edits are skipped, other errors abort.
pub fn run(session: &mut EditorSession, script: &Script) -> Result<usize> {
    if let Some(name) = &script.project_name {
        session.set_project_name(name.clone());
    }
    if let Some(duration) = script.duration {
        session.set_duration(duration).context("invalid script duration")?;
    }

    let mut rejected = 0;
    for (index, step) in script.steps.iter().enumerate() {
        match apply(session, step) {
            Ok(()) => {}
            Err(err) if err.is_rejection() => rejected += 1,
            Err(err) => {
                return Err(err).with_context(|| format!("step {index} failed: {step:?}"));
            }
        }
    }
    info!(
        steps = script.steps.len(),
        rejected,
        clips = session.timeline().clips().len(),
        "script applied"
    );
    Ok(rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Script {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        let script = parse(
            r#"{
                "projectName": "Demo",
                "steps": [
                    {"op": "import", "items": [{"name": "a.mp4", "kind": "video", "url": "blob:a", "duration": 8}]},
                    {"op": "split", "clip": 0, "at": 3},
                    {"op": "resize", "clip": 1, "edge": "right", "to": 6},
                    {"op": "undo"}
                ]
            }"#,
        );
        assert_eq!(script.project_name.as_deref(), Some("Demo"));
        assert_eq!(script.steps.len(), 4);
        assert!(matches!(script.steps[3], ScriptStep::Undo));
    }

    #[test]
    fn test_run_edits_session() {
        let script = parse(
            r#"{"steps": [
                {"op": "import", "items": [{"name": "a.mp4", "kind": "video", "url": "blob:a", "duration": 8}]},
                {"op": "split", "clip": 0, "at": 3},
                {"op": "move", "clip": 1, "to": 10},
                {"op": "split", "clip": 0, "at": 20}
            ]}"#,
        );
        let mut session = EditorSession::default();
        let rejected = run(&mut session, &script).unwrap();
        assert_eq!(rejected, 1);

        let clips = session.timeline().clips().as_slice();
        assert_eq!(clips.len(), 2);
        assert!((clips[1].start_time - 10.0).abs() < 1e-9);
        assert!((clips[1].end_time - 15.0).abs() < 1e-9);
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn test_rejected_drag_does_not_block_later_steps() {
        let script = parse(
            r#"{"steps": [
                {"op": "import", "items": [{"name": "a.mp4", "kind": "video", "url": "blob:a", "duration": 8}]},
                {"op": "move", "clip": 0, "to": 1e308},
                {"op": "move", "clip": 0, "to": 5}
            ]}"#,
        );
        let mut session = EditorSession::default();
        assert_eq!(run(&mut session, &script).unwrap(), 1);
        assert!(!session.gesture_active());
        let clip = &session.timeline().clips().as_slice()[0];
        assert!((clip.start_time - 5.0).abs() < 1e-9);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_missing_index_aborts() {
        let script = parse(r#"{"steps": [{"op": "delete", "clip": 7}]}"#);
        let mut session = EditorSession::default();
        let err = run(&mut session, &script).unwrap_err();
        assert!(err.to_string().contains("step 0"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edit.json");
        std::fs::write(&path, r#"{"steps": [{"op": "zoom", "level": 2}]}"#).unwrap();
        let script = Script::load(&path).unwrap();
        assert_eq!(script.steps.len(), 1);
        assert!(Script::load(&dir.path().join("missing.json")).is_err());
    }
}
