use crate::application::ports::user_repository::{RepositoryError, UserRepository};
use crate::domain::users::user::User;

pub struct UpdateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

/// Fields left as `None` keep their stored value. `roles: Some(None)` clears
/// the roles column.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub roles: Option<Option<String>>,
}

impl<'a, R: UserRepository + ?Sized> UpdateUser<'a, R> {
    pub async fn execute(
        &self,
        id: i64,
        req: &UpdateUserRequest,
    ) -> Result<Option<User>, RepositoryError> {
        let Some(mut user) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        if let Some(username) = &req.username {
            user.set_username(username.clone());
        }
        if let Some(name) = &req.name {
            user.set_name(name.clone());
        }
        if let Some(roles) = &req.roles {
            user.set_roles(roles.clone());
        }
        // The row may have been deleted between the read and the write.
        if !self.repo.update(&user).await? {
            return Ok(None);
        }
        tracing::info!(user_id = id, "user_updated");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::NewUser;
    use crate::infrastructure::memory::InMemoryUserRepository;

    async fn seed(repo: &InMemoryUserRepository, username: &str) -> User {
        repo.create(&NewUser {
            username: username.into(),
            name: "Seed".into(),
            password_hash: Some("$argon2id$seed".into()),
            roles: Some("USER".into()),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn applies_only_supplied_fields() {
        let repo = InMemoryUserRepository::new();
        let user = seed(&repo, "ana").await;
        let uc = UpdateUser { repo: &repo };

        let updated = uc
            .execute(
                user.id(),
                &UpdateUserRequest {
                    name: Some("Ana Perez".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.username(), "ana");
        assert_eq!(updated.name(), "Ana Perez");
        assert_eq!(updated.roles(), Some("USER"));
        assert_eq!(updated.password(), Some("$argon2id$seed"));
    }

    #[tokio::test]
    async fn clears_roles_when_asked() {
        let repo = InMemoryUserRepository::new();
        let user = seed(&repo, "ana").await;
        let uc = UpdateUser { repo: &repo };

        let updated = uc
            .execute(
                user.id(),
                &UpdateUserRequest {
                    roles: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.roles(), None);

        let stored = repo.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.roles(), None);
    }

    #[tokio::test]
    async fn unknown_id_yields_none() {
        let repo = InMemoryUserRepository::new();
        let uc = UpdateUser { repo: &repo };
        let res = uc.execute(42, &UpdateUserRequest::default()).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn renaming_onto_taken_username_fails() {
        let repo = InMemoryUserRepository::new();
        seed(&repo, "ana").await;
        let bob = seed(&repo, "bob").await;
        let uc = UpdateUser { repo: &repo };

        let err = uc
            .execute(
                bob.id(),
                &UpdateUserRequest {
                    username: Some("ana".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateUsername(_)));

        let stored = repo.find_by_id(bob.id()).await.unwrap().unwrap();
        assert_eq!(stored.username(), "bob");
    }
}
