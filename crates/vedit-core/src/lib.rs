//! VEdit Core - Foundation types for the timeline engine
//!
//! This crate provides the fundamental types used throughout VEdit:
//! - Track and clip identifiers
//! - Error taxonomy shared by every edit operation
//! - Time ranges and timecode formatting
//! - Timeline geometry (seconds <-> pixels)
//! - Track colors and editor configuration

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod time;

pub use color::Color;
pub use config::{
    EditingConfig, EditorConfig, HistoryConfig, ImportConfig, PlaybackConfig, TimelineConfig,
};
pub use error::{Result, VeditError};
pub use geometry::{RulerMark, TimelineGeometry, ZoomRange};
pub use id::{ClipId, TrackId};
pub use time::{format_ruler_label, format_timecode, TimeRange, TIME_EPSILON};

/// Interaction constants shared by the timeline and playback crates.
pub mod defaults {
    /// Base timeline width in pixels at zoom 1.0.
    pub const TIMELINE_WIDTH_PX: f64 = 2000.0;

    /// Playback tick period in milliseconds.
    pub const TICK_MS: u64 = 100;

    /// Allowed drift between an element clock and the playhead (seconds).
    pub const DRIFT_TOLERANCE: f64 = 0.1;

    /// Shortest clip a resize gesture may produce (seconds).
    pub const MIN_CLIP_DURATION: f64 = 0.1;

    /// Maximum number of history snapshots kept.
    pub const HISTORY_LIMIT: usize = 50;

    /// Project duration for a fresh session (seconds).
    pub const PROJECT_DURATION: f64 = 60.0;
}
