use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use crate::data::note_repository::NoteRepository;
use crate::domain::{
    error::DomainError,
    note::{NewNote, Note, NoteChanges},
};

#[derive(Clone)]
pub struct NoteService<R: NoteRepository + 'static> {
    repo: Arc<R>,
}

impl<R> NoteService<R>
where
    R: NoteRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NoteNotFound(id))
    }

    pub async fn notes_for_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError> {
        self.repo.find_by_user(user_id).await
    }

    pub async fn notes_for_day(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Note>, DomainError> {
        self.repo.find_by_user_between(user_id, date, date).await
    }

    pub async fn notes_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Note>, DomainError> {
        if from > to {
            return Err(DomainError::InvalidRange { from, to });
        }
        self.repo.find_by_user_between(user_id, from, to).await
    }

    #[instrument(skip(self, content))]
    pub async fn create_note(
        &self,
        user_id: i64,
        date: NaiveDate,
        content: String,
    ) -> Result<Note, DomainError> {
        let note = NewNote::new(user_id, date, content);
        note.validate()?;
        self.repo.create(note).await
    }

    /// Applies `changes` and stamps `updated_at`. An empty change set
    /// leaves the stored note untouched.
    #[instrument(skip(self, changes))]
    pub async fn update_note(&self, id: i64, changes: NoteChanges) -> Result<Note, DomainError> {
        if changes.is_empty() {
            return self.get_note(id).await;
        }
        changes.validate()?;
        match self.repo.update(id, changes).await {
            Ok(Some(note)) => Ok(note),
            Ok(None) => Err(DomainError::NoteNotFound(id)),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::NoteNotFound(id));
        }
        Ok(())
    }

    /// Detaches a note from its owner, which deletes it.
    #[instrument(skip(self))]
    pub async fn remove_from_user(&self, user_id: i64, note_id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_for_user(user_id, note_id).await? {
            return Err(DomainError::NoteNotFound(note_id));
        }
        Ok(())
    }
}
