//! Read-only project snapshot handed to the render service.

use serde::Serialize;
use vedit_core::{Result, VeditError};

use crate::clip::Clip;
use crate::track::Track;

/// Schema version of [`RenderSnapshot`].
pub const EXPORT_VERSION: u32 = 1;

/// Consistent copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub version: u32,
    pub project_name: String,
    /// Project duration in seconds
    pub duration: f64,
    pub tracks: Vec<Track>,
    pub clips: Vec<Clip>,
    /// Application version that produced the snapshot.
    pub app_version: String,
}

impl RenderSnapshot {
    pub fn new(
        project_name: impl Into<String>,
        duration: f64,
        tracks: Vec<Track>,
        clips: Vec<Clip>,
    ) -> Self {
        Self {
            version: EXPORT_VERSION,
            project_name: project_name.into(),
            duration,
            tracks,
            clips,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to pretty JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| VeditError::Serialization(format!("Failed to serialize snapshot: {}", e)))
    }

    /// Clips sorted by start time, for renderers that walk the timeline.
    pub fn clips_by_start(&self) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self.clips.iter().collect();
        clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipSpec;
    use crate::project::Timeline;
    use crate::track::TrackKind;

    #[test]
    fn test_to_json_shape() {
        let mut timeline = Timeline::with_default_tracks();
        let track = timeline.tracks().nth(0).unwrap().id;
        timeline
            .add_clip(ClipSpec::new(track, "late", TrackKind::Video, 5.0, 6.0))
            .unwrap();
        timeline
            .add_clip(ClipSpec::new(track, "early", TrackKind::Video, 0.0, 1.0))
            .unwrap();

        let snapshot = RenderSnapshot::new(
            "Demo",
            60.0,
            timeline.tracks().as_slice().to_vec(),
            timeline.clips().as_slice().to_vec(),
        );
        let value: serde_json::Value = serde_json::from_slice(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["projectName"], "Demo");
        assert_eq!(value["tracks"].as_array().unwrap().len(), 2);
        assert_eq!(value["tracks"][0]["color"], "#3b82f6");
        assert_eq!(value["clips"][0]["name"], "late");

        let names: Vec<&str> = snapshot.clips_by_start().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["early", "late"]);
    }
}
