use async_trait::async_trait;
use rolegate_core::AppError;
use rolegate_models::{NewUser, User};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another record already owns this email.
    #[error("email already exists")]
    DuplicateEmail,
    #[error("stored record is invalid: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for user records.
///
/// `insert` must reject a duplicate email with [`StoreError::DuplicateEmail`]
/// even when `exists_by_email` raced with another writer.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::internal(err)
    }
}
