//! Timeline geometry: conversion between seconds and pixel offsets.
//!
//! All functions are pure. Inputs are sanitized on construction so that
//! `pixels_per_second` is always finite and strictly positive.

use serde::{Deserialize, Serialize};

use crate::time::format_ruler_label;

/// Smallest duration used as a divisor.
pub const DURATION_EPSILON: f64 = 1e-3;

/// Largest duration accepted before clamping (about 115 days).
pub const MAX_DURATION: f64 = 1e7;

/// Widest view accepted before clamping.
pub const MAX_WIDTH_PX: f64 = 1e9;

/// Duration substituted for a missing or non-positive project duration.
const FALLBACK_DURATION: f64 = 1.0;

/// Allowed zoom interval for a timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl ZoomRange {
    /// Main editing timeline.
    pub const MAIN: Self = Self::new(0.25, 4.0);
    /// Compact overview timeline.
    pub const OVERVIEW: Self = Self::new(0.5, 2.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a zoom factor into the range. NaN maps to `min`.
    pub fn clamp(self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            self.min
        } else {
            zoom.clamp(self.min, self.max)
        }
    }

    /// A range is usable when it is finite, positive and ordered.
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.max >= self.min
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::MAIN
    }
}

/// A labelled tick on the time ruler.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerMark {
    pub time: f64,
    pub x: f64,
    pub label: String,
}

/// Pixel mapping for one timeline view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    width_px: f64,
    zoom: f64,
    duration: f64,
    zoom_range: ZoomRange,
}

impl TimelineGeometry {
    /// Create a geometry, clamping every input into its safe domain.
    pub fn new(width_px: f64, zoom: f64, duration: f64, zoom_range: ZoomRange) -> Self {
        let zoom_range = if zoom_range.is_valid() {
            zoom_range
        } else {
            ZoomRange::MAIN
        };
        let width_px = if width_px.is_finite() {
            width_px.clamp(1.0, MAX_WIDTH_PX)
        } else {
            1.0
        };
        Self {
            width_px,
            zoom: zoom_range.clamp(zoom),
            duration: sanitize_duration(duration),
            zoom_range,
        }
    }

    /// Geometry of the main timeline at the given zoom and duration.
    pub fn main(width_px: f64, zoom: f64, duration: f64) -> Self {
        Self::new(width_px, zoom, duration, ZoomRange::MAIN)
    }

    #[inline]
    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The guarded duration used for every conversion.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Pixels covered by one second of timeline.
    #[inline]
    pub fn pixels_per_second(&self) -> f64 {
        (self.width_px * self.zoom) / self.duration
    }

    /// Pixel offset of a time.
    #[inline]
    pub fn time_to_pixel(&self, time: f64) -> f64 {
        time * self.pixels_per_second()
    }

    /// Time under a pixel offset, clamped to `[0, duration]`.
    pub fn pixel_to_time(&self, x: f64) -> f64 {
        let time = self.pixel_to_time_unclamped(x);
        if time.is_nan() {
            return 0.0;
        }
        time.clamp(0.0, self.duration)
    }

    /// Time under a pixel offset without clamping.
    #[inline]
    pub fn pixel_to_time_unclamped(&self, x: f64) -> f64 {
        x / self.pixels_per_second()
    }

    /// Convert a pointer delta into a time delta (may be negative).
    #[inline]
    pub fn pixel_delta_to_time(&self, dx: f64) -> f64 {
        dx / self.pixels_per_second()
    }

    /// Total pixel width of the content area.
    #[inline]
    pub fn content_width_px(&self) -> f64 {
        self.width_px * self.zoom
    }

    /// Same geometry with a different zoom factor (clamped).
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self {
            zoom: self.zoom_range.clamp(zoom),
            ..self
        }
    }

    /// Same geometry with a different duration (guarded).
    pub fn with_duration(self, duration: f64) -> Self {
        Self {
            duration: sanitize_duration(duration),
            ..self
        }
    }

    /// Step the zoom by `step` (e.g. `+0.25` for zoom in), clamped.
    pub fn zoom_by(self, step: f64) -> Self {
        self.with_zoom(self.zoom + step)
    }

    /// Ruler interval in seconds for the current zoom level.
    pub fn ruler_interval(&self) -> f64 {
        if self.zoom > 2.0 {
            1.0
        } else if self.zoom > 1.0 {
            2.0
        } else {
            5.0
        }
    }

    /// Labelled ruler ticks from zero up to and including the duration.
    pub fn ruler_marks(&self) -> Vec<RulerMark> {
        let interval = self.ruler_interval();
        let count = (self.duration / interval).floor() as usize;
        (0..=count)
            .map(|i| {
                let time = i as f64 * interval;
                RulerMark {
                    time,
                    x: self.time_to_pixel(time),
                    label: format_ruler_label(time),
                }
            })
            .collect()
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        FALLBACK_DURATION
    } else {
        duration.clamp(DURATION_EPSILON, MAX_DURATION)
    }
}
