//! VEdit Playback - Playhead clock and element synchronization
//!
//! Drives the logical playhead and keeps the video and audio playback
//! elements aligned to it:
//! - Fixed-period ticking with loop-to-zero at the project end
//! - Per-track volume and mute resolved onto the elements
//! - Drift correction against each element's own clock
//! - Scrubbing without history involvement

pub mod element;
pub mod levels;
pub mod synchronizer;

pub use element::{ElementSlot, ElementState, PlaybackElement, SimulatedElement};
pub use levels::{resolve_levels, ElementLevels, MasterLevels};
pub use synchronizer::{PlaybackSynchronizer, PlayheadState, TickOutcome};

