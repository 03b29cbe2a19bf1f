pub mod submissions;
pub mod tools;
