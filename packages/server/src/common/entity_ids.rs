//! Typed ID definitions for the directory's entities.
//!
//! Each entity gets its own incompatible ID type, so a `SubmissionId` can
//! never be passed where a `ToolId` is expected.

pub use super::id::Id;

/// Marker type for ToolSubmission entities (unreviewed intake requests).
pub struct ToolSubmission;

/// Marker type for Tool entities (published directory entries).
pub struct Tool;

/// Typed ID for ToolSubmission entities.
pub type SubmissionId = Id<ToolSubmission>;

/// Typed ID for Tool entities.
pub type ToolId = Id<Tool>;
