//! Clip types for the timeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vedit_core::{ClipId, Result, TimeRange, TrackId, VeditError};

use crate::track::TrackKind;

/// Reference to a media source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// URL or path the playback element loads
    pub url: String,
    /// URL before any proxying, if it differs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

impl MediaRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            original_url: None,
        }
    }
}

/// A filter parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Named filter parameters of a clip, in key order.
pub type Filters = BTreeMap<String, FilterValue>;

/// A clip placed on a track.
///
/// `start_time < end_time` holds for every clip held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Owning track
    pub track_id: TrackId,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Content kind
    pub kind: TrackKind,
    /// Timeline start in seconds
    pub start_time: f64,
    /// Timeline end in seconds
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    /// Text body for text clips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: Filters,
    /// Precomputed audio peaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<Vec<f32>>,
}

impl Clip {
    /// Duration on the timeline.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Whether the clip is active at `time`. Both boundary instants count.
    #[inline]
    pub fn is_active_at(&self, time: f64) -> bool {
        self.range().contains(time)
    }

    /// Copy of this clip under a fresh id.
    pub(crate) fn copy_with_new_id(&self) -> Self {
        Self {
            id: ClipId::new(),
            ..self.clone()
        }
    }
}

/// Everything needed to create a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSpec {
    pub track_id: TrackId,
    pub name: String,
    pub kind: TrackKind,
    pub start_time: f64,
    pub end_time: f64,
    pub media: Option<MediaRef>,
    pub content: Option<String>,
    pub filters: Filters,
    pub waveform: Option<Vec<f32>>,
}

impl ClipSpec {
    pub fn new(
        track_id: TrackId,
        name: impl Into<String>,
        kind: TrackKind,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            track_id,
            name: name.into(),
            kind,
            start_time,
            end_time,
            media: None,
            content: None,
            filters: Filters::new(),
            waveform: None,
        }
    }

    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_waveform(mut self, peaks: Vec<f32>) -> Self {
        self.waveform = Some(peaks);
        self
    }

    pub(crate) fn build(self) -> Result<Clip> {
        ensure_range(self.start_time, self.end_time)?;
        Ok(Clip {
            id: ClipId::new(),
            track_id: self.track_id,
            name: self.name,
            kind: self.kind,
            start_time: self.start_time,
            end_time: self.end_time,
            media: self.media,
            content: self.content,
            filters: self.filters,
            waveform: self.waveform,
        })
    }
}

/// Partial clip update. Unset fields are left unchanged.
///
/// Start and end may be set together; the merged result is validated as
/// a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipUpdate {
    pub track_id: Option<TrackId>,
    pub name: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub media: Option<MediaRef>,
    pub content: Option<String>,
    /// Entries merged over the existing filters
    pub filters: Filters,
    /// Replaces the whole filter map before merging
    pub replace_filters: Option<Filters>,
}

impl ClipUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(mut self, track_id: TrackId) -> Self {
        self.track_id = Some(track_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn end(mut self, end: f64) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn times(self, start: f64, end: f64) -> Self {
        self.start(start).end(end)
    }

    pub fn media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn replace_filters(mut self, filters: Filters) -> Self {
        self.replace_filters = Some(filters);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto a copy of `clip`, rejecting an inverted result.
    pub(crate) fn merged(self, clip: &Clip) -> Result<Clip> {
        let mut next = clip.clone();
        if let Some(track_id) = self.track_id {
            next.track_id = track_id;
        }
        if let Some(name) = self.name {
            next.name = name;
        }
        if let Some(start) = self.start_time {
            next.start_time = start;
        }
        if let Some(end) = self.end_time {
            next.end_time = end;
        }
        if let Some(media) = self.media {
            next.media = Some(media);
        }
        if let Some(content) = self.content {
            next.content = Some(content);
        }
        if let Some(filters) = self.replace_filters {
            next.filters = filters;
        }
        next.filters.extend(self.filters);
        ensure_range(next.start_time, next.end_time)?;
        Ok(next)
    }
}

/// Accept only finite, non-negative, non-empty ranges.
pub(crate) fn ensure_range(start: f64, end: f64) -> Result<()> {
    if TimeRange::new(start, end).is_valid() {
        Ok(())
    } else {
        Err(VeditError::InvalidRange { start, end })
    }
}
