//! Headless playback driver.
//!
//! Runs the synchronizer on a tokio interval against simulated elements
//! whose clocks run freely between ticks, so drift correction gets
//! exercised the same way a real media surface would.

use std::time::Duration;
use tracing::info;
use vedit_core::PlaybackConfig;
use vedit_playback::{ElementSlot, PlaybackSynchronizer, SimulatedElement, TickOutcome};
use vedit_timeline::Timeline;

/// Summary of a playback run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackReport {
    pub ticks: u32,
    pub loops: u32,
    pub corrections: u64,
    pub final_time: f64,
}

/// Play `timeline` for `ticks` ticks of the configured period.
///
/// `element_skew` is added to each element's own clock per tick, as a
/// stand-in for decoder jitter.
pub async fn run_playback(
    timeline: &Timeline,
    config: &PlaybackConfig,
    duration: f64,
    ticks: u32,
    element_skew: f64,
) -> PlaybackReport {
    let mut sync = PlaybackSynchronizer::new(config);
    let video = SimulatedElement::new();
    let audio = SimulatedElement::new();
    sync.attach(ElementSlot::Video, Box::new(video.clone()));
    sync.attach(ElementSlot::Audio, Box::new(audio.clone()));
    sync.set_playing(true);

    let period = config.tick_period().max(Duration::from_millis(1));
    let step = config.tick_seconds();
    let mut interval = tokio::time::interval(period);
    // First tick completes immediately.
    interval.tick().await;

    let mut loops = 0;
    for _ in 0..ticks {
        interval.tick().await;
        video.advance(step);
        audio.advance(step + element_skew);
        if sync.tick(timeline, duration) == TickOutcome::Looped {
            loops += 1;
        }
    }
    sync.set_playing(false);

    let report = PlaybackReport {
        ticks,
        loops,
        corrections: sync.corrections(),
        final_time: sync.current_time(),
    };
    info!(
        ticks,
        loops,
        corrections = report.corrections,
        final_time = report.final_time,
        "playback finished"
    );
    report
}
