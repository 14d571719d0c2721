use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::id_sequence::IdSequence;
use crate::application::ports::user_repository::{NewUser, RepositoryError, UserRepository};
use crate::domain::users::user::{NAME_MAX_LEN, USERNAME_MAX_LEN, User};
use crate::infrastructure::memory::AtomicIdSequence;

/// Process-local user store with the same constraints as the `usuario`
/// table: unique username, 100 character username and name, ids drawn from
/// a sequence and never reused.
pub struct InMemoryUserRepository {
    sequence: Arc<dyn IdSequence>,
    rows: Mutex<BTreeMap<i64, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_sequence(Arc::new(AtomicIdSequence::default()))
    }

    pub fn with_sequence(sequence: Arc<dyn IdSequence>) -> Self {
        Self {
            sequence,
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn check_lengths(username: &str, name: &str) -> Result<(), RepositoryError> {
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(RepositoryError::ValueTooLong {
            column: "usuario",
            max: USERNAME_MAX_LEN,
        });
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(RepositoryError::ValueTooLong {
            column: "nombre",
            max: NAME_MAX_LEN,
        });
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        // Drawn before the checks so a rejected insert still burns its id.
        let id = self.sequence.next_id().await?;
        check_lengths(&new_user.username, &new_user.name)?;

        let mut rows = self.rows.lock().await;
        if rows.values().any(|u| u.username() == new_user.username) {
            return Err(RepositoryError::DuplicateUsername(new_user.username.clone()));
        }
        if rows.contains_key(&id) {
            return Err(RepositoryError::Storage(anyhow::anyhow!(
                "id {id} already present"
            )));
        }
        let user = User::from_row(
            id,
            new_user.username.clone(),
            new_user.name.clone(),
            new_user.password_hash.clone(),
            new_user.roles.clone(),
        );
        rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        check_lengths(user.username(), user.name())?;

        let mut rows = self.rows.lock().await;
        let Some(stored) = rows.get(&user.id()) else {
            return Ok(false);
        };
        if rows
            .values()
            .any(|u| u.id() != user.id() && u.username() == user.username())
        {
            return Err(RepositoryError::DuplicateUsername(user.username().to_string()));
        }
        let merged = User::from_row(
            user.id(),
            user.username().to_string(),
            user.name().to_string(),
            stored.password().map(str::to_string),
            user.roles().map(str::to_string),
        );
        rows.insert(user.id(), merged);
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.rows.lock().await.remove(&id).is_some())
    }
}
