//! Published directory entries.
//!
//! Tools are created by the moderation executor and read back for slug
//! probing and duplicate detection. Post-publication editing is an admin
//! concern outside this subsystem.

pub mod models;
