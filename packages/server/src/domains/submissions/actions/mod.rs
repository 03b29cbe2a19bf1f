pub mod intake;
pub mod moderate;

pub use intake::{
    submit_tool, IntakeOutcome, EXCESSIVE_LINKS_REASON, MAX_SUBMISSIONS_PER_HOUR,
};
pub use moderate::moderate;
