use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered calendar owner. Notes are owned through `notes.user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    // Stored exactly as supplied, no hashing is applied.
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been persisted yet; the id and creation time
/// are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
