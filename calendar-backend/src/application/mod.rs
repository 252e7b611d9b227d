pub mod note_service;
pub mod user_service;
