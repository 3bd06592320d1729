//! Placing uploaded media on the timeline.
//!
//! A batch of imports lands sequentially after the latest video clip.
//! Audio is stacked at the cursor without advancing it, so music sits
//! under the pictures it was imported with.

use tracing::info;
use vedit_core::{ClipId, ImportConfig, Result, TrackId, VeditError};

use crate::clip::{ClipSpec, MediaRef};
use crate::project::Timeline;
use crate::track::TrackKind;

/// Peak count used for imported audio waveforms.
pub const WAVEFORM_POINTS: usize = 600;

/// Shortest waveform produced.
const MIN_WAVEFORM_POINTS: usize = 32;

/// One uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaImport {
    pub name: String,
    pub kind: TrackKind,
    pub url: String,
    /// Decoded media length. Required for video.
    pub duration: Option<f64>,
    /// Mono PCM for building an audio waveform.
    pub samples: Option<Vec<f32>>,
}

impl MediaImport {
    pub fn new(name: impl Into<String>, kind: TrackKind, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            url: url.into(),
            duration: None,
            samples: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_samples(mut self, samples: Vec<f32>) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Length this import occupies on the timeline.
    fn placed_duration(&self, config: &ImportConfig) -> Result<f64> {
        let duration = match (self.kind, self.duration) {
            (_, Some(d)) => d,
            (TrackKind::Video, None) => {
                return Err(VeditError::InvalidParameter(format!(
                    "video import {:?} needs its decoded duration",
                    self.name
                )))
            }
            (TrackKind::Audio, None) => config.audio_duration,
            (TrackKind::Image | TrackKind::Text, None) => config.image_duration,
        };
        if duration.is_finite() && duration > 0.0 {
            Ok(duration)
        } else {
            Err(VeditError::InvalidParameter(format!(
                "import {:?} has unusable duration {duration}",
                self.name
            )))
        }
    }
}

/// What an import batch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// New clips in import order
    pub clips: Vec<ClipId>,
    /// Where the playhead should move: the end of the last imported clip
    pub playhead: Option<f64>,
    /// Whether the default tracks had to be created
    pub created_tracks: bool,
}

/// Default target track for a clip of `kind`.
///
/// Audio prefers the first audio track, then the second track, then the
/// first. Everything else prefers the first video track, then the first.
pub fn default_track_for(timeline: &Timeline, kind: TrackKind) -> Option<TrackId> {
    let tracks = timeline.tracks();
    let track = match kind {
        TrackKind::Audio => tracks
            .first_of_kind(TrackKind::Audio)
            .or_else(|| tracks.nth(1))
            .or_else(|| tracks.nth(0)),
        _ => tracks
            .first_of_kind(TrackKind::Video)
            .or_else(|| tracks.nth(0)),
    };
    track.map(|t| t.id)
}

/// Import a batch. Either every item is placed or none is.
pub fn import_media(
    timeline: &mut Timeline,
    config: &ImportConfig,
    items: Vec<MediaImport>,
) -> Result<ImportOutcome> {
    let mut staged = timeline.clone();
    let created_tracks = staged.tracks().is_empty();
    if created_tracks {
        staged.push_default_tracks();
    }

    let mut cursor = staged
        .clips()
        .last_end_of_kind(TrackKind::Video)
        .unwrap_or(0.0);
    let mut outcome = ImportOutcome {
        clips: Vec::with_capacity(items.len()),
        playhead: None,
        created_tracks,
    };

    for item in items {
        let duration = item.placed_duration(config)?;
        let track_id = default_track_for(&staged, item.kind)
            .ok_or_else(|| VeditError::InvalidParameter("no track to import into".into()))?;

        let mut spec = ClipSpec::new(track_id, item.name, item.kind, cursor, cursor + duration)
            .with_media(MediaRef {
                url: item.url.clone(),
                original_url: Some(item.url),
            });
        if item.kind == TrackKind::Audio {
            if let Some(samples) = item.samples.as_deref() {
                spec = spec.with_waveform(waveform_peaks(samples, WAVEFORM_POINTS));
            }
        }

        outcome.clips.push(staged.add_clip(spec)?);
        outcome.playhead = Some(cursor + duration);
        if item.kind != TrackKind::Audio {
            cursor += duration;
        }
    }

    info!(
        clips = outcome.clips.len(),
        created_tracks, "media imported"
    );
    *timeline = staged;
    Ok(outcome)
}

/// Downsample PCM to `target_len` mean absolute amplitudes in `[0, 1]`.
pub fn waveform_peaks(samples: &[f32], target_len: usize) -> Vec<f32> {
    let len = target_len.max(MIN_WAVEFORM_POINTS);
    let block = (samples.len() / len).max(1);
    (0..len)
        .map(|i| {
            let start = (i * block).min(samples.len());
            let end = (start + block).min(samples.len());
            let chunk = &samples[start..end];
            if chunk.is_empty() {
                0.0
            } else {
                let mean = chunk.iter().map(|s| s.abs()).sum::<f32>() / chunk.len() as f32;
                mean.min(1.0)
            }
        })
        .collect()
}
