//! Integration tests for playback against a live session.

use vedit_core::EditorConfig;
use vedit_playback::{ElementSlot, PlaybackSynchronizer, SimulatedElement, TickOutcome};
use vedit_timeline::{EditorSession, MediaImport, TrackKind, TrackUpdate};

struct Rig {
    session: EditorSession,
    sync: PlaybackSynchronizer,
    video: SimulatedElement,
    audio: SimulatedElement,
}

fn rig() -> Rig {
    let mut session = EditorSession::default();
    session.set_duration(10.0).unwrap();
    session
        .import_media(vec![
            MediaImport::new("shot.mp4", TrackKind::Video, "blob:shot").with_duration(10.0),
            MediaImport::new("music.mp3", TrackKind::Audio, "blob:music").with_duration(10.0),
        ])
        .unwrap();

    let mut sync = PlaybackSynchronizer::new(&EditorConfig::default().playback);
    let video = SimulatedElement::new();
    let audio = SimulatedElement::new();
    sync.attach(ElementSlot::Video, Box::new(video.clone()));
    sync.attach(ElementSlot::Audio, Box::new(audio.clone()));
    Rig {
        session,
        sync,
        video,
        audio,
    }
}

#[test]
fn playback_loops_at_end_and_keeps_playing() {
    let Rig {
        session,
        mut sync,
        video,
        ..
    } = rig();
    let duration = session.duration();
    sync.set_current_time(session.timeline(), 9.95, duration);
    sync.set_playing(true);

    assert_eq!(sync.tick(session.timeline(), duration), TickOutcome::Looped);
    assert_eq!(sync.current_time(), 0.0);
    assert!(sync.is_playing());
    assert_eq!(video.state().position, 0.0);
    assert!(video.state().playing);
}

#[test]
fn track_edits_reach_elements_on_next_sync() {
    let Rig {
        mut session,
        mut sync,
        audio,
        video,
    } = rig();
    let audio_track = session.tracks().first_of_kind(TrackKind::Audio).unwrap().id;
    sync.seek(session.timeline(), 2.0, session.duration());
    assert!(!audio.state().muted);

    session
        .update_track(audio_track, TrackUpdate::new().muted(true).volume(0.5))
        .unwrap();
    sync.refresh(session.timeline());
    assert!(audio.state().muted);
    assert_eq!(audio.state().volume, 0.5);
    assert!(!video.state().muted);

    sync.set_global_volume(session.timeline(), 0.5).unwrap();
    assert_eq!(audio.state().volume, 0.25);
    assert_eq!(video.state().volume, 0.5);
}

#[test]
fn free_running_elements_are_pulled_back() {
    let Rig {
        session,
        mut sync,
        video,
        audio,
    } = rig();
    let duration = session.duration();
    sync.set_playing(true);

    for _ in 0..20 {
        video.advance(0.1);
        audio.advance(0.13);
        sync.tick(session.timeline(), duration);
        let now = sync.current_time();
        assert!((video.state().position - now).abs() <= 0.1 + 1e-9);
        assert!((audio.state().position - now).abs() <= 0.1 + 1e-9);
    }
    assert!(sync.corrections() > 0);
}

#[test]
fn scrub_then_undo_keeps_playhead_in_range() {
    let Rig {
        mut session,
        mut sync,
        video,
        ..
    } = rig();
    sync.begin_scrub();
    sync.scrub_to(7.5, session.duration());
    sync.end_scrub(session.timeline(), session.duration());
    assert_eq!(video.state().position, 7.5);

    session.undo();
    assert!(session.timeline().clips().is_empty());
    sync.refresh(session.timeline());
    assert!(sync.active_clips(session.timeline()).is_empty());
    assert_eq!(sync.current_time(), 7.5);
}
