//! VEdit Timeline - Timeline data model
//!
//! Implements the in-memory editing model:
//! - Tracks (lanes) and clips placed on them
//! - Split, drag and resize edits
//! - Snapshot-based undo/redo
//! - Media import and the export snapshot
//! - `EditorSession`, the owned editor state tying it all together

pub mod clip;
pub mod editing;
pub mod export;
pub mod gesture;
pub mod history;
pub mod import;
pub mod project;
pub mod session;
pub mod split;
pub mod store;
pub mod track;

pub use clip::{Clip, ClipSpec, ClipUpdate, FilterValue, Filters, MediaRef};
pub use editing::{EditingState, TextOverlay, VideoTools};
pub use export::{RenderSnapshot, EXPORT_VERSION};
pub use gesture::{hit_test_edge, DragResizeController, GestureCommit, GestureKind, ResizeEdge};
pub use history::{EditorSnapshot, HistoryManager};
pub use import::{ImportOutcome, MediaImport};
pub use project::Timeline;
pub use session::EditorSession;
pub use split::{split_clip, SplitOutcome};
pub use store::{ActiveClips, ClipStore};
pub use track::{Track, TrackKind, TrackRegistry, TrackSpec, TrackUpdate};
