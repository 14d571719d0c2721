use crate::application::ports::user_repository::{RepositoryError, UserRepository};

pub struct DeleteUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteUser<'a, R> {
    pub async fn execute(&self, id: i64) -> Result<bool, RepositoryError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(user_id = id, "user_deleted");
        }
        Ok(deleted)
    }
}
