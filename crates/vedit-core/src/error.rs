//! Error types for VEdit.

use thiserror::Error;

use crate::id::TrackId;

/// Main error type for VEdit operations.
///
/// Expected rejections (unknown ids, inverted ranges, locked tracks) are
/// reported through this type and never leave partial state behind.
#[derive(Error, Debug)]
pub enum VeditError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid range: end {end} must be greater than start {start}")]
    InvalidRange { start: f64, end: f64 },

    #[error("Invalid split point {at}: must lie strictly inside ({start}, {end})")]
    InvalidSplitPoint { at: f64, start: f64, end: f64 },

    #[error("Track is locked: {0}")]
    LockedTrack(TrackId),

    #[error("Cannot remove the last remaining track")]
    LastTrack,

    #[error("A gesture is already in progress")]
    GestureActive,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VeditError {
    /// Build a `NotFound` error for any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True for the expected, state-preserving rejections of an edit.
    ///
    /// Everything else (I/O, configuration, serialization) is a hard failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidSplitPoint { .. }
                | Self::LockedTrack(_)
                | Self::LastTrack
                | Self::GestureActive
        )
    }
}

/// Result type alias for VEdit operations.
pub type Result<T> = std::result::Result<T, VeditError>;
