use crate::application::ports::user_repository::{RepositoryError, UserRepository};
use crate::domain::users::user::User;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        self.repo.find_by_id(id).await
    }
}
