//! Editor configuration.
//!
//! Every field has a default, so a partial JSON file only overrides what
//! it names.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::defaults;
use crate::error::{Result, VeditError};
use crate::geometry::ZoomRange;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub timeline: TimelineConfig,
    pub history: HistoryConfig,
    pub playback: PlaybackConfig,
    pub editing: EditingConfig,
    pub import: ImportConfig,
}

/// Timeline view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Timeline width in pixels at zoom 1.0.
    pub width_px: f64,
    /// Zoom interval of the main timeline.
    pub zoom: ZoomRange,
    /// Zoom interval of the overview strip.
    pub overview_zoom: ZoomRange,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            width_px: defaults::TIMELINE_WIDTH_PX,
            zoom: ZoomRange::MAIN,
            overview_zoom: ZoomRange::OVERVIEW,
        }
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum snapshots kept; the oldest are dropped first.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::HISTORY_LIMIT,
        }
    }
}

/// Playback clock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tick period in milliseconds.
    pub tick_ms: u64,
    /// Element drift (seconds) tolerated before a corrective seek.
    pub drift_tolerance: f64,
    /// Project duration of a fresh session (seconds).
    pub default_duration: f64,
}

impl PlaybackConfig {
    /// Tick period as a `Duration`.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Tick period in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_ms: defaults::TICK_MS,
            drift_tolerance: defaults::DRIFT_TOLERANCE,
            default_duration: defaults::PROJECT_DURATION,
        }
    }
}

/// Clip editing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    /// Minimum clip duration enforced by resize gestures.
    pub min_clip_duration: f64,
    /// Gap between a clip and its duplicate.
    pub duplicate_gap: f64,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            min_clip_duration: defaults::MIN_CLIP_DURATION,
            duplicate_gap: 0.1,
        }
    }
}

/// Media import defaults for media whose length is not decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub audio_duration: f64,
    pub image_duration: f64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            audio_duration: 30.0,
            image_duration: 5.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON bytes and validate it.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| VeditError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| VeditError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(VeditError::Config(format!("{name} must be positive, got {v}")))
            }
        };

        positive("timeline.width_px", self.timeline.width_px)?;
        if !self.timeline.zoom.is_valid() || !self.timeline.overview_zoom.is_valid() {
            return Err(VeditError::Config("zoom ranges must be positive and ordered".into()));
        }
        if self.history.max_entries == 0 {
            return Err(VeditError::Config("history.max_entries must be at least 1".into()));
        }
        if self.playback.tick_ms == 0 {
            return Err(VeditError::Config("playback.tick_ms must be at least 1".into()));
        }
        positive("playback.drift_tolerance", self.playback.drift_tolerance)?;
        positive("playback.default_duration", self.playback.default_duration)?;
        positive("editing.min_clip_duration", self.editing.min_clip_duration)?;
        if !(self.editing.duplicate_gap.is_finite() && self.editing.duplicate_gap >= 0.0) {
            return Err(VeditError::Config("editing.duplicate_gap must be >= 0".into()));
        }
        positive("import.audio_duration", self.import.audio_duration)?;
        positive("import.image_duration", self.import.image_duration)?;
        Ok(())
    }
}
