use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::domain::error::DomainError;

/// Upper bound on note content, counted in characters like `VARCHAR(2000)`.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// A note pinned to one calendar day of its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `None` until the note is modified for the first time.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_id: i64,
    pub date: NaiveDate,
    pub content: String,
}

impl NewNote {
    pub fn new(user_id: i64, date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            user_id,
            date,
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_content(&self.content)
    }
}

/// Partial modification of a stored note. Fields left as `None` keep
/// their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub date: Option<NaiveDate>,
    pub content: Option<String>,
}

impl NoteChanges {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            date: None,
            content: Some(content.into()),
        }
    }

    pub fn date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            content: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.content.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.content {
            Some(content) => validate_content(content),
            None => Ok(()),
        }
    }
}

pub fn validate_content(content: &str) -> Result<(), DomainError> {
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(DomainError::ContentTooLong {
            length,
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(())
}
