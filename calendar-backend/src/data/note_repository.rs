use crate::data::{Violation, violation};
use crate::domain::error::DomainError;
use crate::domain::note::{MAX_CONTENT_CHARS, NewNote, Note, NoteChanges};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: NewNote) -> Result<Note, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, DomainError>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError>;
    /// Notes of `user_id` dated within `from..=to`.
    async fn find_by_user_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Note>, DomainError>;
    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_for_user(&self, user_id: i64, note_id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(e: sqlx::Error, user_id: Option<i64>, content: Option<&str>) -> DomainError {
    match (violation(&e), user_id, content) {
        (Some(Violation::ForeignKey), Some(user_id), _) => DomainError::UserNotFound(user_id),
        (Some(Violation::ValueTooLong), _, Some(content)) => DomainError::ContentTooLong {
            length: content.chars().count(),
            max: MAX_CONTENT_CHARS,
        },
        (Some(other), _, _) => DomainError::Constraint(format!("{:?}: {}", other, e)),
        (None, _, _) => DomainError::Internal(format!("database error: {}", e)),
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note, DomainError> {
        let created = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, date, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, content, created_at, updated_at
            "#,
        )
        .bind(note.user_id)
        .bind(note.date)
        .bind(&note.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create note: {}", e);
            write_error(e, Some(note.user_id), Some(&note.content))
        })?;

        info!(note_id = created.id, user_id = created.user_id, date = %created.date, "note created");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, DomainError> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, date, content, created_at, updated_at
            FROM notes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, date, content, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching notes of user {}: {}", user_id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_user_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Note>, DomainError> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, date, content, created_at, updated_at
            FROM notes
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "db error while fetching notes of user {} from {} to {}: {}",
                user_id, from, to, e
            );
            DomainError::Internal(e.to_string())
        })
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, DomainError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET
                date = COALESCE($1, date),
                content = COALESCE($2, content),
                updated_at = $3
            WHERE id = $4
            RETURNING id, user_id, date, content, created_at, updated_at
            "#,
        )
        .bind(changes.date)
        .bind(changes.content.as_deref())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update note {}: {}", id, e);
            write_error(e, None, changes.content.as_deref())
        })?;

        if note.is_some() {
            info!(note_id = id, "note updated");
        }

        Ok(note)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(note_id = id, "note deleted");
        }
        Ok(removed)
    }

    async fn delete_for_user(&self, user_id: i64, note_id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(note_id, user_id, "note removed from user");
        }
        Ok(removed)
    }
}
