//! Tool Submission Intake & Moderation
//!
//! Components:
//! - models: submission row, status enum, store trait + Postgres impl
//! - actions/intake: layered spam defenses in front of persistence
//! - actions/moderate: approve/reject/delete state machine
//! - data: wire payloads for the public and admin endpoints
//! - errors: closed error enums with machine-readable codes

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;

pub use actions::{moderate, submit_tool, IntakeOutcome};
pub use errors::{ModerationError, SubmitError};
