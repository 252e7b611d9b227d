pub mod error;
pub mod note;
pub mod user;
