use crate::data::{Violation, violation};
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
    /// Removes the user together with every note it owns.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create user: {}", e);
            match violation(&e) {
                Some(Violation::Unique) => DomainError::UserAlreadyExists(user.email.clone()),
                Some(Violation::ValueTooLong) => {
                    DomainError::Constraint("email and password are limited to 255 characters".into())
                }
                Some(other) => DomainError::Constraint(format!("{:?}: {}", other, e)),
                None => DomainError::Internal(format!("database error: {}", e)),
            }
        })?;

        info!(user_id = created.id, email = %created.email, "user created");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by email {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to check user email {}: {}", email, e);
                DomainError::Internal(format!("database error: {}", e))
            })
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete user {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        info!(user_id = id, "user deleted");
        Ok(())
    }
}
