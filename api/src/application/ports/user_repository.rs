use async_trait::async_trait;

use crate::domain::users::user::User;

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub roles: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),
    #[error("value for {column} exceeds {max} characters")]
    ValueTooLong { column: &'static str, max: usize },
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl From<anyhow::Error> for RepositoryError {
    fn from(err: anyhow::Error) -> Self {
        RepositoryError::Storage(err)
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new row under the next id of the sequence.
    async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    /// All rows, ascending by id.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
    /// Writes username, name and roles of the row keyed by `user.id()`.
    /// The stored credential is left untouched. Returns `false` when no row
    /// has that id.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
