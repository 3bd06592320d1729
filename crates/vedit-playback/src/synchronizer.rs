//! Playhead clock and element synchronization.
//!
//! `current_time` is the single source of truth. Elements follow it; the
//! only reads from an element are position checks for drift correction.

use serde::Serialize;
use tracing::debug;
use vedit_core::{PlaybackConfig, Result, VeditError};
use vedit_timeline::{ActiveClips, Timeline};

use crate::element::{ElementSlot, PlaybackElement};
use crate::levels::{resolve_levels, MasterLevels};

/// Logical playhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayheadState {
    /// Seconds, within `[0, duration]`
    pub current_time: f64,
    pub is_playing: bool,
    /// Element playback rate, always positive
    pub playback_rate: f64,
}

impl Default for PlayheadState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            playback_rate: 1.0,
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing, or scrubbing.
    Idle,
    /// The playhead moved forward to the given time.
    Advanced(f64),
    /// The playhead reached the end and wrapped to zero.
    Looped,
}

/// Clamp a time into `[0, duration]`; NaN maps to zero.
fn clamp_time(time: f64, duration: f64) -> f64 {
    let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
    if time.is_nan() {
        0.0
    } else {
        time.clamp(0.0, duration)
    }
}

/// Keeps the video and audio elements aligned to the playhead.
pub struct PlaybackSynchronizer {
    playhead: PlayheadState,
    master: MasterLevels,
    /// Seconds added per tick, independent of playback rate
    tick_period: f64,
    drift_tolerance: f64,
    video: Option<Box<dyn PlaybackElement>>,
    audio: Option<Box<dyn PlaybackElement>>,
    scrubbing: bool,
    corrections: u64,
}

impl PlaybackSynchronizer {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            playhead: PlayheadState::default(),
            master: MasterLevels::default(),
            tick_period: config.tick_seconds(),
            drift_tolerance: config.drift_tolerance,
            video: None,
            audio: None,
            scrubbing: false,
            corrections: 0,
        }
    }

    // ── Elements ────────────────────────────────────────────────

    /// Attach the element for `slot`, returning any previous one. The
    /// element is brought to the current rate, position and play state.
    pub fn attach(
        &mut self,
        slot: ElementSlot,
        mut element: Box<dyn PlaybackElement>,
    ) -> Option<Box<dyn PlaybackElement>> {
        element.set_playback_rate(self.playhead.playback_rate);
        element.seek(self.playhead.current_time);
        if self.playhead.is_playing {
            element.play();
        } else {
            element.pause();
        }
        self.slot_mut(slot).replace(element)
    }

    pub fn detach(&mut self, slot: ElementSlot) -> Option<Box<dyn PlaybackElement>> {
        self.slot_mut(slot).take()
    }

    fn slot_mut(&mut self, slot: ElementSlot) -> &mut Option<Box<dyn PlaybackElement>> {
        match slot {
            ElementSlot::Video => &mut self.video,
            ElementSlot::Audio => &mut self.audio,
        }
    }

    fn elements_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn PlaybackElement>> {
        self.video.iter_mut().chain(self.audio.iter_mut())
    }

    // ── State ───────────────────────────────────────────────────

    pub fn playhead(&self) -> PlayheadState {
        self.playhead
    }

    pub fn current_time(&self) -> f64 {
        self.playhead.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.is_playing
    }

    pub fn playback_rate(&self) -> f64 {
        self.playhead.playback_rate
    }

    pub fn master(&self) -> MasterLevels {
        self.master
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Drift corrections performed so far.
    pub fn corrections(&self) -> u64 {
        self.corrections
    }

    /// Clips under the playhead, for UI polling.
    pub fn active_clips<'a>(&self, timeline: &'a Timeline) -> ActiveClips<'a> {
        timeline.clips_at(self.playhead.current_time)
    }

    // ── Clock ───────────────────────────────────────────────────

    /// Advance one tick while playing.
    ///
    /// Reaching `duration` wraps to zero and keeps playing; both elements
    /// are forced back to zero.
    pub fn tick(&mut self, timeline: &Timeline, duration: f64) -> TickOutcome {
        if !self.playhead.is_playing || self.scrubbing {
            return TickOutcome::Idle;
        }
        let current = self.playhead.current_time;
        let next = current + self.tick_period;
        if current >= duration || next >= duration {
            self.playhead.current_time = 0.0;
            for element in self.elements_mut() {
                element.seek(0.0);
            }
            debug!(duration, "playhead looped");
            self.refresh(timeline);
            TickOutcome::Looped
        } else {
            self.playhead.current_time = next;
            self.refresh(timeline);
            TickOutcome::Advanced(next)
        }
    }

    /// Write the playhead. Elements are corrected only if they drifted.
    pub fn set_current_time(&mut self, timeline: &Timeline, time: f64, duration: f64) {
        self.playhead.current_time = clamp_time(time, duration);
        self.refresh(timeline);
    }

    /// Move the playhead and force every element to it.
    pub fn seek(&mut self, timeline: &Timeline, time: f64, duration: f64) {
        let time = clamp_time(time, duration);
        self.playhead.current_time = time;
        for element in self.elements_mut() {
            element.seek(time);
        }
        self.refresh(timeline);
    }

    /// Skip by `delta` seconds (e.g. ±1, or ±0.1 for fine steps).
    pub fn step(&mut self, timeline: &Timeline, delta: f64, duration: f64) {
        let target = self.playhead.current_time + delta;
        self.seek(timeline, target, duration);
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playhead.is_playing == playing {
            return;
        }
        self.playhead.is_playing = playing;
        for element in self.elements_mut() {
            if playing {
                element.play();
            } else {
                element.pause();
            }
        }
        debug!(playing, "playback state changed");
    }

    /// Flip play/pause. Returns the new state.
    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playhead.is_playing);
        self.playhead.is_playing
    }

    /// Set the element rate. Applied to every element immediately.
    pub fn set_playback_rate(&mut self, rate: f64) -> Result<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(VeditError::InvalidParameter(format!(
                "playback rate must be positive, got {rate}"
            )));
        }
        self.playhead.playback_rate = rate;
        for element in self.elements_mut() {
            element.set_playback_rate(rate);
        }
        Ok(())
    }

    // ── Levels ──────────────────────────────────────────────────

    pub fn set_global_volume(&mut self, timeline: &Timeline, volume: f64) -> Result<()> {
        self.master.set_volume(volume)?;
        self.refresh(timeline);
        Ok(())
    }

    pub fn set_global_muted(&mut self, timeline: &Timeline, muted: bool) {
        self.master.muted = muted;
        self.refresh(timeline);
    }

    /// Flip the global mute. Returns the new state.
    pub fn toggle_global_mute(&mut self, timeline: &Timeline) -> bool {
        let muted = self.master.toggle_mute();
        self.refresh(timeline);
        muted
    }

    // ── Scrubbing ───────────────────────────────────────────────

    /// Start a playhead drag. Pauses playback.
    pub fn begin_scrub(&mut self) {
        self.set_playing(false);
        self.scrubbing = true;
    }

    /// Move the playhead during a drag. Elements are not touched.
    /// Returns `false` when no scrub is in progress.
    pub fn scrub_to(&mut self, time: f64, duration: f64) -> bool {
        if !self.scrubbing {
            return false;
        }
        self.playhead.current_time = clamp_time(time, duration);
        true
    }

    /// Finish the drag with a single forced seek.
    pub fn end_scrub(&mut self, timeline: &Timeline, duration: f64) {
        if !self.scrubbing {
            return;
        }
        self.scrubbing = false;
        self.seek(timeline, self.playhead.current_time, duration);
    }

    // ── Sync ────────────────────────────────────────────────────

    /// Push track levels into the elements and correct drift. Tracks are
    /// read fresh, so mute and volume edits apply here.
    pub fn refresh(&mut self, timeline: &Timeline) {
        let now = self.playhead.current_time;
        for (slot, levels) in resolve_levels(timeline, now, &self.master) {
            if let Some(element) = self.slot_mut(slot).as_mut() {
                element.set_volume(levels.volume);
                element.set_muted(levels.muted);
            }
        }

        let tolerance = self.drift_tolerance;
        let mut corrected = 0;
        for element in self.elements_mut() {
            let drift = element.position() - now;
            if drift.abs() > tolerance {
                element.seek(now);
                corrected += 1;
                debug!(drift, at = now, "element resynced");
            }
        }
        self.corrections += corrected;
    }
}

impl std::fmt::Debug for PlaybackSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSynchronizer")
            .field("playhead", &self.playhead)
            .field("master", &self.master)
            .field("video", &self.video.is_some())
            .field("audio", &self.audio.is_some())
            .field("scrubbing", &self.scrubbing)
            .finish()
    }
}
