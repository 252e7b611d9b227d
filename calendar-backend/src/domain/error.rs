use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(i64),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("note not found: {0}")]
    NoteNotFound(i64),
    #[error("note content is {length} characters, at most {max} allowed")]
    ContentTooLong { length: usize, max: usize },
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("internal error: {0}")]
    Internal(String),
}
