//! Project-wide look and overlay settings captured by undo snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use vedit_core::Color;

/// Adjustment sliders, all starting at zero.
pub const ADJUSTMENT_KEYS: [&str; 15] = [
    "brightness",
    "contrast",
    "saturation",
    "exposure",
    "hue",
    "blur",
    "sharpen",
    "filmGrain",
    "vignette",
    "sepia",
    "grayscale",
    "invert",
    "vintage",
    "warm",
    "cool",
];

/// Trim, crop and transform tools applied to the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoTools {
    pub trim_start: f64,
    pub trim_end: f64,
    pub crop_x: f64,
    pub crop_y: f64,
    /// Percent of the frame width kept
    pub crop_width: f64,
    /// Percent of the frame height kept
    pub crop_height: f64,
    pub speed: f64,
    pub volume: f64,
    /// Degrees
    pub rotation: f64,
    /// Percent
    pub opacity: f64,
}

impl Default for VideoTools {
    fn default() -> Self {
        Self {
            trim_start: 0.0,
            trim_end: 0.0,
            crop_x: 0.0,
            crop_y: 0.0,
            crop_width: 100.0,
            crop_height: 100.0,
            speed: 1.0,
            volume: 1.0,
            rotation: 0.0,
            opacity: 100.0,
        }
    }
}

/// Text drawn over the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: Uuid,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: Color,
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            x,
            y,
            font_size: 24.0,
            color: Color::rgb(0xff, 0xff, 0xff),
        }
    }
}

/// Editing state that undo restores alongside tracks and clips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditingState {
    pub adjustments: BTreeMap<String, f64>,
    pub active_filters: Vec<String>,
    pub active_effects: Vec<String>,
    pub video_tools: VideoTools,
    pub text_overlays: Vec<TextOverlay>,
}

impl Default for EditingState {
    fn default() -> Self {
        Self {
            adjustments: ADJUSTMENT_KEYS
                .iter()
                .map(|key| (key.to_string(), 0.0))
                .collect(),
            active_filters: Vec::new(),
            active_effects: Vec::new(),
            video_tools: VideoTools::default(),
            text_overlays: Vec::new(),
        }
    }
}

impl EditingState {
    /// Value of one adjustment slider, zero when unset.
    pub fn adjustment(&self, key: &str) -> f64 {
        self.adjustments.get(key).copied().unwrap_or(0.0)
    }

    /// True when nothing differs from a fresh session.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
