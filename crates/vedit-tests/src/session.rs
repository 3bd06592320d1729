//! Integration tests for the editor session: history discipline,
//! gestures and export.

use proptest::prelude::*;
use vedit_core::{EditorConfig, VeditError};
use vedit_timeline::{
    ClipSpec, EditorSession, EditorSnapshot, MediaImport, ResizeEdge, TrackKind, TrackSpec,
    TrackUpdate,
};

fn session_with_clip() -> (EditorSession, vedit_core::ClipId) {
    let mut session = EditorSession::default();
    let outcome = session
        .import_media(vec![
            MediaImport::new("shot.mp4", TrackKind::Video, "blob:shot").with_duration(8.0)
        ])
        .unwrap();
    (session, outcome.clips[0])
}

fn snapshot(session: &EditorSession) -> EditorSnapshot {
    EditorSnapshot::capture("current", session.timeline(), session.editing())
}

// ── History ────────────────────────────────────────────────────

#[test]
fn cursor_flags_track_position() {
    let (mut session, clip) = session_with_clip();
    session.split_clip(clip, 4.0).unwrap();
    assert_eq!(session.history().len(), 3);

    assert!(session.can_undo() && !session.can_redo());
    session.undo();
    assert!(session.can_undo() && session.can_redo());
    session.undo();
    assert_eq!(session.history().cursor(), Some(0));
    assert!(!session.can_undo() && session.can_redo());
    assert!(!session.undo());
}

#[test]
fn undo_then_redo_restores_exact_state() {
    let (mut session, clip) = session_with_clip();
    session.split_clip(clip, 3.0).unwrap();
    session.set_adjustment("brightness", 20.0);
    session.commit("adjust brightness").unwrap();

    let before = snapshot(&session);
    assert!(session.undo());
    assert!(!snapshot(&session).same_state(&before));
    assert!(session.redo());
    assert!(snapshot(&session).same_state(&before));
}

#[test]
fn new_commit_discards_redo_branch() {
    let (mut session, clip) = session_with_clip();
    session.duplicate_clip(clip).unwrap();
    session.undo();
    assert!(session.can_redo());
    session.delete_clip(clip).unwrap();
    assert!(!session.can_redo());
    assert_eq!(session.timeline().clips().len(), 0);
}

#[test]
fn history_is_bounded() {
    let mut config = EditorConfig::default();
    config.history.max_entries = 5;
    let mut session = EditorSession::new(config);
    for i in 0..12 {
        session.set_adjustment("contrast", i as f64);
        session.commit("adjust contrast").unwrap();
    }
    assert_eq!(session.history().len(), 5);
    assert_eq!(session.history().cursor(), Some(4));
}

// ── Gestures ───────────────────────────────────────────────────

#[test]
fn gesture_commits_once_on_release() {
    let (mut session, clip) = session_with_clip();
    let entries = session.history().len();
    let geo = session.geometry();
    let start_x = geo.time_to_pixel(0.0);

    session.begin_move(clip, start_x).unwrap();
    for step in 1..=10 {
        session.update_gesture(start_x + step as f64 * 10.0).unwrap();
    }
    assert_eq!(session.history().len(), entries);
    assert!(matches!(
        session.split_clip(clip, 2.0),
        Err(VeditError::GestureActive)
    ));

    let commit = session.end_gesture().unwrap();
    assert_eq!(session.history().len(), entries + 1);
    assert!((commit.after.duration() - 8.0).abs() < 1e-9);
}

#[test]
fn abandoned_resize_restores_clip() {
    let (mut session, clip) = session_with_clip();
    let entries = session.history().len();
    let before = session.clip(clip).unwrap().clone();

    session.begin_resize(clip, ResizeEdge::Right).unwrap();
    session
        .update_gesture(session.geometry().time_to_pixel(20.0))
        .unwrap();
    assert!((session.clip(clip).unwrap().end_time - 20.0).abs() < 1e-9);
    session.abandon_gesture().unwrap();

    assert_eq!(session.clip(clip).unwrap(), &before);
    assert_eq!(session.history().len(), entries);
    assert!(session.end_gesture().is_none());
}

#[test]
fn resize_respects_minimum_duration() {
    let (mut session, clip) = session_with_clip();
    session.begin_resize(clip, ResizeEdge::Left).unwrap();
    session
        .update_gesture(session.geometry().time_to_pixel(50.0))
        .unwrap();
    session.end_gesture();
    let c = session.clip(clip).unwrap();
    assert!((c.duration() - session.config().editing.min_clip_duration).abs() < 1e-9);
    assert_eq!(c.end_time, 8.0);
}

#[test]
fn edits_wait_for_the_active_gesture() {
    let (mut session, clip) = session_with_clip();
    let entries = session.history().len();
    let pps = session.geometry().pixels_per_second();

    session.begin_move(clip, 0.0).unwrap();
    session.update_gesture(10.0 * pps).unwrap();
    assert!(matches!(
        session.add_track(TrackSpec::new("Titles", TrackKind::Text)),
        Err(VeditError::GestureActive)
    ));
    assert!(matches!(
        session.commit("adjust"),
        Err(VeditError::GestureActive)
    ));
    assert!(matches!(
        session.import_media(vec![
            MediaImport::new("b.mp4", TrackKind::Video, "blob:b").with_duration(2.0)
        ]),
        Err(VeditError::GestureActive)
    ));
    assert_eq!(session.history().len(), entries);
    assert_eq!(session.tracks().len(), 2);

    session.abandon_gesture().unwrap();
    assert_eq!(session.clip(clip).unwrap().start_time, 0.0);
    session.add_track(TrackSpec::new("Titles", TrackKind::Text)).unwrap();
    assert!(session.undo());
    assert!(session.redo());
    assert_eq!(session.clip(clip).unwrap().start_time, 0.0);
    assert_eq!(session.tracks().len(), 3);
}

#[test]
fn abandon_restores_clip_after_track_lock() {
    let (mut session, clip) = session_with_clip();
    let entries = session.history().len();
    let track = session.clip(clip).unwrap().track_id;
    let pps = session.geometry().pixels_per_second();

    session.begin_move(clip, 0.0).unwrap();
    session.update_gesture(10.0 * pps).unwrap();
    session
        .update_track(track, TrackUpdate::new().locked(true))
        .unwrap();
    session.abandon_gesture().unwrap();

    assert!(!session.gesture_active());
    assert_eq!(session.clip(clip).unwrap().start_time, 0.0);
    assert_eq!(session.history().len(), entries);
}

// ── Import & export ────────────────────────────────────────────

#[test]
fn import_places_sequentially_and_stacks_audio() {
    let mut session = EditorSession::default();
    let outcome = session
        .import_media(vec![
            MediaImport::new("a.mp4", TrackKind::Video, "blob:a").with_duration(4.0),
            MediaImport::new("music.mp3", TrackKind::Audio, "blob:m"),
            MediaImport::new("b.mp4", TrackKind::Video, "blob:b").with_duration(6.0),
        ])
        .unwrap();
    let starts: Vec<f64> = outcome
        .clips
        .iter()
        .map(|id| session.clip(*id).unwrap().start_time)
        .collect();
    assert_eq!(starts, vec![0.0, 4.0, 4.0]);
    assert_eq!(session.clip(outcome.clips[1]).unwrap().end_time, 34.0);
}

#[test]
fn empty_import_records_nothing() {
    let mut session = EditorSession::default();
    let outcome = session.import_media(Vec::new()).unwrap();
    assert!(outcome.clips.is_empty());
    assert_eq!(session.history().len(), 1);
    assert!(!session.can_undo());
}

#[test]
fn failed_import_changes_nothing() {
    let mut session = EditorSession::default();
    let entries = session.history().len();
    let result = session.import_media(vec![
        MediaImport::new("a.mp4", TrackKind::Video, "blob:a").with_duration(4.0),
        MediaImport::new("broken.mp4", TrackKind::Video, "blob:x"),
    ]);
    assert!(result.is_err());
    assert!(session.timeline().clips().is_empty());
    assert_eq!(session.history().len(), entries);
}

#[test]
fn export_snapshot_is_detached() {
    let (mut session, clip) = session_with_clip();
    session.set_project_name("Trailer");
    let snapshot = session.export_snapshot();
    session.delete_clip(clip).unwrap();

    assert_eq!(snapshot.clips.len(), 1);
    let value: serde_json::Value =
        serde_json::from_slice(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(value["projectName"], "Trailer");
    assert_eq!(value["tracks"][1]["name"], "Audio Track 1");
}

proptest! {
    #[test]
    fn undo_redo_roundtrip_for_any_commit_sequence(
        edits in prop::collection::vec((0u8..3, 0.5f64..20.0), 1..15),
        undos in 1usize..10,
    ) {
        let mut session = EditorSession::default();
        let track = session.tracks().nth(0).unwrap().id;
        for (op, t) in edits {
            match op {
                0 => {
                    let _ = session.add_clip(ClipSpec::new(track, "c", TrackKind::Video, t, t + 1.0));
                    session.commit("add clip").unwrap();
                }
                1 => {
                    session.set_adjustment("saturation", t);
                    session.commit("adjust saturation").unwrap();
                }
                _ => {
                    if let Some(id) = session.timeline().clips().iter().next().map(|c| c.id) {
                        let _ = session.delete_clip(id);
                    }
                }
            }
        }

        for _ in 0..undos {
            let before = snapshot(&session);
            if !session.undo() {
                break;
            }
            prop_assert!(session.redo());
            prop_assert!(snapshot(&session).same_state(&before));
            session.undo();
        }
    }
}
