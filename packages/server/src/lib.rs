// AI Tool List - API Core
//
// Backend for the tool directory: accepts untrusted third-party submissions,
// runs layered spam defenses, and moves submissions through a human
// moderation workflow that ends in a published Tool with a unique slug.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
