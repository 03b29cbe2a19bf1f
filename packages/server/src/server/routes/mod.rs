pub mod health;
pub mod submissions;
pub mod submit;

pub use health::health_handler;
pub use submissions::{list_submissions_handler, moderation_handler};
pub use submit::submit_handler;
