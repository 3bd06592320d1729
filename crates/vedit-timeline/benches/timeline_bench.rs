//! Benchmarks for timeline queries and history snapshots.
//!
//! Run with: cargo bench -p vedit-timeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vedit_timeline::{ClipSpec, EditingState, EditorSnapshot, Timeline, TrackKind};

fn build_timeline(clips: usize) -> Timeline {
    let mut timeline = Timeline::with_default_tracks();
    let track = timeline.tracks().nth(0).map(|t| t.id).unwrap();
    for i in 0..clips {
        let start = i as f64 * 2.0;
        timeline
            .add_clip(ClipSpec::new(track, format!("clip {i}"), TrackKind::Video, start, start + 2.5))
            .unwrap();
    }
    timeline
}

fn bench_clips_at(c: &mut Criterion) {
    let timeline = build_timeline(500);

    c.bench_function("clips_at_500", |b| {
        b.iter(|| timeline.clips_at(black_box(401.0)).len());
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let timeline = build_timeline(500);
    let editing = EditingState::default();

    c.bench_function("snapshot_500", |b| {
        b.iter(|| EditorSnapshot::capture("bench", black_box(&timeline), &editing));
    });
}

criterion_group!(benches, bench_clips_at, bench_snapshot);
criterion_main!(benches);
