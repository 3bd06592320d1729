//! Integration tests for the timeline model.
//!
//! Exercises vedit-core geometry together with vedit-timeline edits.

use proptest::prelude::*;
use vedit_core::{TimelineGeometry, VeditError};
use vedit_timeline::{
    split_clip, ClipSpec, ClipUpdate, DragResizeController, MediaRef, Timeline, TrackKind,
    TrackSpec, TrackUpdate,
};

// ── Helpers ────────────────────────────────────────────────────

fn two_track_project() -> (Timeline, vedit_core::TrackId, vedit_core::TrackId) {
    let mut timeline = Timeline::new();
    let t1 = timeline
        .add_track(TrackSpec::new("T1", TrackKind::Video))
        .unwrap();
    let t2 = timeline
        .add_track(TrackSpec::new("T2", TrackKind::Audio))
        .unwrap();
    (timeline, t1, t2)
}

fn geometry() -> TimelineGeometry {
    TimelineGeometry::main(2000.0, 1.0, 60.0)
}

// ── Boundaries ─────────────────────────────────────────────────

#[test]
fn clips_at_shared_boundary_returns_both() {
    let (mut timeline, t1, _) = two_track_project();
    let a = timeline
        .add_clip(ClipSpec::new(t1, "A", TrackKind::Video, 0.0, 5.0))
        .unwrap();
    let b = timeline
        .add_clip(ClipSpec::new(t1, "B", TrackKind::Video, 5.0, 10.0))
        .unwrap();

    let ids: Vec<_> = timeline.clips_at(5.0).iter().map(|c| c.id).collect();
    assert!(ids.contains(&a));
    assert!(ids.contains(&b));
    assert_eq!(ids.len(), 2);
}

#[test]
fn remove_track_cascades_to_its_clips_only() {
    let (mut timeline, t1, t2) = two_track_project();
    timeline
        .add_clip(ClipSpec::new(t1, "c1", TrackKind::Video, 0.0, 4.0))
        .unwrap();
    let c2 = timeline
        .add_clip(ClipSpec::new(t2, "c2", TrackKind::Audio, 0.0, 4.0))
        .unwrap();

    let (removed, cascaded) = timeline.remove_track(t1).unwrap();
    assert_eq!(removed.id, t1);
    assert_eq!(cascaded.len(), 1);

    let remaining: Vec<_> = timeline.clips().iter().map(|c| c.id).collect();
    assert_eq!(remaining, vec![c2]);
    assert!(matches!(
        timeline.remove_track(t2),
        Err(VeditError::LastTrack)
    ));
}

#[test]
fn locked_track_rejects_clip_edits() {
    let (mut timeline, t1, _) = two_track_project();
    let clip = timeline
        .add_clip(ClipSpec::new(t1, "c", TrackKind::Video, 0.0, 4.0))
        .unwrap();
    timeline
        .update_track(t1, TrackUpdate::new().locked(true))
        .unwrap();

    assert!(matches!(
        timeline.update_clip(clip, ClipUpdate::new().start(1.0)),
        Err(VeditError::LockedTrack(_))
    ));
    assert!(matches!(
        split_clip(&mut timeline, clip, 2.0),
        Err(VeditError::LockedTrack(_))
    ));
    assert_eq!(timeline.clip(clip).unwrap().start_time, 0.0);
}

#[test]
fn invalid_range_leaves_clip_unchanged() {
    let (mut timeline, t1, _) = two_track_project();
    let clip = timeline
        .add_clip(ClipSpec::new(t1, "c", TrackKind::Video, 2.0, 4.0))
        .unwrap();
    let before = timeline.clip(clip).unwrap().clone();

    assert!(timeline
        .update_clip(clip, ClipUpdate::new().end(2.0))
        .is_err());
    assert!(timeline
        .update_clip(clip, ClipUpdate::new().start(f64::NAN))
        .is_err());
    assert_eq!(timeline.clip(clip).unwrap(), &before);
}

// ── Split ──────────────────────────────────────────────────────

#[test]
fn split_partitions_and_shares_media() {
    let (mut timeline, t1, _) = two_track_project();
    let clip = timeline
        .add_clip(
            ClipSpec::new(t1, "Intro", TrackKind::Video, 1.0, 9.0)
                .with_media(MediaRef::new("blob:intro")),
        )
        .unwrap();

    let outcome = split_clip(&mut timeline, clip, 4.0).unwrap();
    let left = timeline.clip(outcome.original).unwrap();
    let right = timeline.clip(outcome.created).unwrap();
    assert_eq!((left.start_time, left.end_time), (1.0, 4.0));
    assert_eq!((right.start_time, right.end_time), (4.0, 9.0));
    assert_eq!(left.media, right.media);
    assert_eq!(right.name, "Intro (2)");

    for at in [1.0, 4.0, 9.0, 12.0] {
        assert!(matches!(
            split_clip(&mut timeline, clip, at),
            Err(VeditError::InvalidSplitPoint { .. })
        ));
    }
}

// ── Drag ───────────────────────────────────────────────────────

#[test]
fn drag_shifts_both_ends_by_pixel_delta() {
    let (mut timeline, t1, _) = two_track_project();
    let clip = timeline
        .add_clip(ClipSpec::new(t1, "c", TrackKind::Video, 3.0, 7.0))
        .unwrap();
    let geo = geometry();
    let mut gestures = DragResizeController::default();

    let grab = geo.time_to_pixel(4.0);
    gestures.begin_move(&timeline, clip, grab, geo).unwrap();
    gestures.update(&mut timeline, grab + 50.0).unwrap();
    let commit = gestures.commit().unwrap();

    let shift = geo.pixel_delta_to_time(50.0);
    assert!((commit.after.start - (3.0 + shift)).abs() < 1e-9);
    assert!((commit.after.end - (7.0 + shift)).abs() < 1e-9);
    assert!((commit.after.duration() - 4.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn every_edit_keeps_ranges_valid(
        ops in prop::collection::vec((0u8..4, 0.0f64..20.0, 0.0f64..20.0), 1..40)
    ) {
        let (mut timeline, t1, _) = two_track_project();
        timeline
            .add_clip(ClipSpec::new(t1, "seed", TrackKind::Video, 0.0, 10.0))
            .unwrap();

        for (op, a, b) in ops {
            let Some(target) = timeline.clips().iter().next().map(|c| c.id) else {
                break;
            };
            let _ = match op {
                0 => timeline.add_clip(ClipSpec::new(t1, "n", TrackKind::Video, a, b)).map(|_| ()),
                1 => timeline.update_clip(target, ClipUpdate::new().times(a, b)).map(|_| ()),
                2 => split_clip(&mut timeline, target, a).map(|_| ()),
                _ => timeline.update_clip(target, ClipUpdate::new().end(b)).map(|_| ()),
            };
            for clip in timeline.clips().iter() {
                prop_assert!(clip.start_time < clip.end_time);
            }
        }
    }

    #[test]
    fn split_partitions_any_interior_point(
        start in 0.0f64..50.0,
        len in 0.5f64..50.0,
        frac in 0.01f64..0.99,
    ) {
        let (mut timeline, t1, _) = two_track_project();
        let clip = timeline
            .add_clip(ClipSpec::new(t1, "c", TrackKind::Video, start, start + len))
            .unwrap();
        let at = start + len * frac;
        prop_assume!(at > start && at < start + len);

        let outcome = split_clip(&mut timeline, clip, at).unwrap();
        let left = timeline.clip(outcome.original).unwrap();
        let right = timeline.clip(outcome.created).unwrap();
        prop_assert_eq!(left.start_time, start);
        prop_assert_eq!(left.end_time, right.start_time);
        prop_assert_eq!(right.end_time, start + len);
    }
}
