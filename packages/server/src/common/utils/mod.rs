pub mod slug;
pub mod url_normalize;

pub use slug::*;
pub use url_normalize::*;
