//! Time ranges and timecode formatting.
//!
//! Timeline times are `f64` seconds. Comparisons that must tolerate
//! accumulated float error use [`TIME_EPSILON`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when comparing accumulated float times.
pub const TIME_EPSILON: f64 = 1e-9;

/// Frames per second used for display timecodes.
const DISPLAY_FPS: f64 = 30.0;

/// A time range `[start, end]` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl TimeRange {
    /// Create a new time range from start and end.
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of the range.
    #[inline]
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// A range is valid when both ends are finite, the start is not
    /// negative and the end lies strictly after the start.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start >= 0.0 && self.end > self.start
    }

    /// Closed-interval membership: both boundary instants are inside.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Open-interval membership: both boundary instants are outside.
    #[inline]
    pub fn contains_exclusive(self, time: f64) -> bool {
        time > self.start && time < self.end
    }

    /// Shift both ends by `delta` seconds.
    #[inline]
    pub fn shifted(self, delta: f64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Check if two ranges overlap by more than a single instant.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

/// Format seconds as `MM:SS:FF` display timecode (30 fps frame field).
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let frames = ((seconds % 1.0) * DISPLAY_FPS).floor() as u64;
    format!("{mins:02}:{secs:02}:{frames:02}")
}

/// Format seconds as a `M:SS` ruler label.
pub fn format_ruler_label(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}
