pub mod note_repository;
pub mod user_repository;

use sqlx::error::ErrorKind;

/// SQLSTATE raised when a value does not fit its `VARCHAR(n)` column.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Constraint the database refused a write with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    ValueTooLong,
    NotNull,
    Check,
}

pub fn violation(err: &sqlx::Error) -> Option<Violation> {
    let db = err.as_database_error()?;
    let violation = match db.kind() {
        ErrorKind::UniqueViolation => Violation::Unique,
        ErrorKind::ForeignKeyViolation => Violation::ForeignKey,
        ErrorKind::NotNullViolation => Violation::NotNull,
        ErrorKind::CheckViolation => Violation::Check,
        _ if db.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) => Violation::ValueTooLong,
        _ => return None,
    };
    Some(violation)
}
