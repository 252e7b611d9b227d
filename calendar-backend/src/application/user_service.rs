use std::sync::Arc;

use tracing::{info, instrument};

use crate::data::user_repository::UserRepository;
use crate::domain::{
    error::DomainError,
    user::{NewUser, User},
};

#[derive(Clone)]
pub struct UserService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    /// Exact match on the stored address; no case folding.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repo.find_by_email(email).await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.repo.exists_by_email(email).await
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: String, password: String) -> Result<User, DomainError> {
        if self.repo.exists_by_email(&email).await? {
            info!("email already registered");
            return Err(DomainError::UserAlreadyExists(email));
        }
        self.repo.create(NewUser::new(email, password)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }
}
