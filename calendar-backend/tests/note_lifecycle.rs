mod common;

use std::sync::Arc;
use std::time::Duration;

use calendar_backend::application::note_service::NoteService;
use calendar_backend::application::user_service::UserService;
use calendar_backend::data::note_repository::{NoteRepository, PostgresNoteRepository};
use calendar_backend::data::user_repository::PostgresUserRepository;
use calendar_backend::domain::error::DomainError;
use calendar_backend::domain::note::{MAX_CONTENT_CHARS, NewNote, NoteChanges};
use chrono::NaiveDate;
use sqlx::PgPool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn services(
    pool: &PgPool,
) -> (
    UserService<PostgresUserRepository>,
    NoteService<PostgresNoteRepository>,
) {
    (
        UserService::new(Arc::new(PostgresUserRepository::new(pool.clone()))),
        NoteService::new(Arc::new(PostgresNoteRepository::new(pool.clone()))),
    )
}

#[tokio::test]
async fn note_timestamps_follow_the_lifecycle() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, notes) = services(&pool);
    let user = users
        .register(common::unique_email("a"), "p".into())
        .await
        .unwrap();

    let note = notes
        .create_note(user.id, date(2024, 1, 1), "hello".into())
        .await
        .unwrap();
    assert_eq!(note.user_id, user.id);
    assert!(note.updated_at.is_none());

    tokio::time::sleep(Duration::from_millis(20)).await;
    let first = notes
        .update_note(note.id, NoteChanges::content("hello2"))
        .await
        .unwrap();
    assert_eq!(first.content, "hello2");
    assert_eq!(first.created_at, note.created_at);
    let first_stamp = first.updated_at.unwrap();
    assert!(first_stamp > first.created_at);

    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = notes
        .update_note(note.id, NoteChanges::date(date(2024, 1, 2)))
        .await
        .unwrap();
    assert_eq!(second.content, "hello2");
    assert_eq!(second.date, date(2024, 1, 2));
    assert_eq!(second.created_at, note.created_at);
    assert!(second.updated_at.unwrap() > first_stamp);

    users.delete_user(user.id).await.unwrap();
    let repo = PostgresNoteRepository::new(pool);
    assert!(repo.find_by_id(note.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_user_cascades_to_all_notes() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, notes) = services(&pool);
    let user = users
        .register(common::unique_email("cascade"), "p".into())
        .await
        .unwrap();
    for day in 1..=3 {
        notes
            .create_note(user.id, date(2024, 2, day), format!("day {day}"))
            .await
            .unwrap();
    }
    assert_eq!(notes.notes_for_user(user.id).await.unwrap().len(), 3);

    users.delete_user(user.id).await.unwrap();

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn content_length_is_bounded() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, notes) = services(&pool);
    let user = users
        .register(common::unique_email("len"), "p".into())
        .await
        .unwrap();

    let at_limit = notes
        .create_note(user.id, date(2024, 3, 1), "n".repeat(MAX_CONTENT_CHARS))
        .await
        .unwrap();
    assert_eq!(at_limit.content.chars().count(), MAX_CONTENT_CHARS);

    let err = notes
        .create_note(user.id, date(2024, 3, 1), "n".repeat(MAX_CONTENT_CHARS + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ContentTooLong { length: 2001, .. }));

    users.delete_user(user.id).await.unwrap();
}

#[tokio::test]
async fn storage_rejects_oversized_content_written_directly() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, _) = services(&pool);
    let user = users
        .register(common::unique_email("raw"), "p".into())
        .await
        .unwrap();
    let repo = PostgresNoteRepository::new(pool);

    let err = repo
        .create(NewNote::new(
            user.id,
            date(2024, 3, 2),
            "n".repeat(MAX_CONTENT_CHARS + 5),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ContentTooLong { length: 2005, max: 2000 }));

    users.delete_user(user.id).await.unwrap();
}

#[tokio::test]
async fn note_for_unknown_user_is_rejected() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (_, notes) = services(&pool);

    let err = notes
        .create_note(i64::MAX, date(2024, 4, 1), "nobody".into())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UserNotFound(id) if id == i64::MAX));
}

#[tokio::test]
async fn calendar_views_are_ordered_by_date() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, notes) = services(&pool);
    let user = users
        .register(common::unique_email("range"), "p".into())
        .await
        .unwrap();
    let other = users
        .register(common::unique_email("range-other"), "p".into())
        .await
        .unwrap();

    for (day, text) in [(15, "mid"), (1, "start"), (31, "end")] {
        notes
            .create_note(user.id, date(2024, 5, day), text.into())
            .await
            .unwrap();
    }
    notes
        .create_note(other.id, date(2024, 5, 15), "not mine".into())
        .await
        .unwrap();

    let month: Vec<_> = notes
        .notes_between(user.id, date(2024, 5, 1), date(2024, 5, 31))
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.content)
        .collect();
    assert_eq!(month, ["start", "mid", "end"]);

    let day = notes.notes_for_day(user.id, date(2024, 5, 15)).await.unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].content, "mid");

    users.delete_user(user.id).await.unwrap();
    users.delete_user(other.id).await.unwrap();
}

#[tokio::test]
async fn removing_a_note_from_its_owner_deletes_it() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (users, notes) = services(&pool);
    let owner = users
        .register(common::unique_email("owner"), "p".into())
        .await
        .unwrap();
    let stranger = users
        .register(common::unique_email("stranger"), "p".into())
        .await
        .unwrap();
    let note = notes
        .create_note(owner.id, date(2024, 6, 1), "keep".into())
        .await
        .unwrap();

    assert!(notes.remove_from_user(stranger.id, note.id).await.is_err());
    assert!(notes.get_note(note.id).await.is_ok());

    notes.remove_from_user(owner.id, note.id).await.unwrap();
    assert!(matches!(
        notes.get_note(note.id).await,
        Err(DomainError::NoteNotFound(id)) if id == note.id
    ));
    assert!(users.get_user(owner.id).await.is_ok());

    users.delete_user(owner.id).await.unwrap();
    users.delete_user(stranger.id).await.unwrap();
}

#[tokio::test]
async fn updating_a_missing_note_is_not_found() {
    let Some(pool) = common::pool().await else {
        return;
    };
    let (_, notes) = services(&pool);

    let err = notes
        .update_note(i64::MAX, NoteChanges::content("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoteNotFound(_)));
    assert!(notes.delete_note(i64::MAX).await.is_err());
}
