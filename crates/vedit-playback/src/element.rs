//! Playback element seam.
//!
//! A playback element is anything with its own media clock: a video
//! surface or an audio output. The synchronizer writes position, levels
//! and rate into elements and reads their position back only to correct
//! drift. Element lifecycle belongs to the host.

use parking_lot::Mutex;
use std::sync::Arc;
use vedit_timeline::TrackKind;

/// A media element driven by the playhead.
pub trait PlaybackElement: Send {
    /// The element's own idea of the current timeline time (seconds).
    fn position(&self) -> f64;
    fn seek(&mut self, time: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: f64);
    fn play(&mut self);
    fn pause(&mut self);
}

/// Which element a clip kind drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementSlot {
    Video,
    Audio,
}

impl ElementSlot {
    /// Text and image clips have no element.
    pub fn for_kind(kind: TrackKind) -> Option<Self> {
        match kind {
            TrackKind::Video => Some(Self::Video),
            TrackKind::Audio => Some(Self::Audio),
            TrackKind::Text | TrackKind::Image => None,
        }
    }
}

/// Observable state of a [`SimulatedElement`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub position: f64,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: f64,
    pub playing: bool,
    /// Number of seeks received
    pub seeks: u64,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            position: 0.0,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            playing: false,
            seeks: 0,
        }
    }
}

/// Clock-driven element for headless runs and tests.
///
/// Clones share state, so an observer can hold a handle while the
/// synchronizer owns another.
#[derive(Debug, Clone, Default)]
pub struct SimulatedElement {
    state: Arc<Mutex<ElementState>>,
}

impl SimulatedElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub fn state(&self) -> ElementState {
        self.state.lock().clone()
    }

    /// Run the element's own clock forward by `dt` wall seconds.
    pub fn advance(&self, dt: f64) {
        let mut state = self.state.lock();
        if state.playing {
            state.position += dt * state.playback_rate;
        }
    }

    /// Shift the element clock without counting a seek.
    pub fn nudge(&self, offset: f64) {
        let mut state = self.state.lock();
        state.position = (state.position + offset).max(0.0);
    }
}

impl PlaybackElement for SimulatedElement {
    fn position(&self) -> f64 {
        self.state.lock().position
    }

    fn seek(&mut self, time: f64) {
        let mut state = self.state.lock();
        state.position = time;
        state.seeks += 1;
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.lock().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.state.lock().playback_rate = rate;
    }

    fn play(&mut self) {
        self.state.lock().playing = true;
    }

    fn pause(&mut self) {
        self.state.lock().playing = false;
    }
}
