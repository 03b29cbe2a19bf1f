// Kernel - infrastructure shared by all domains

pub mod deps;
pub mod email_templates;
pub mod resend;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use resend::ResendMailer;
pub use traits::BaseMailer;
