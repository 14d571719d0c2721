use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{NewUser, RepositoryError, UserRepository};
use crate::domain::users::user::User;

pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub password: Option<String>,
    pub roles: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    pub async fn execute(&self, req: &CreateUserRequest) -> Result<User, RepositoryError> {
        let password_hash = match req.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };
        let new_user = NewUser {
            username: req.username.clone(),
            name: req.name.clone(),
            password_hash,
            roles: req.roles.clone(),
        };
        let user = self.repo.create(&new_user).await?;
        tracing::info!(user_id = user.id(), username = %user.username(), "user_created");
        Ok(user)
    }
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryUserRepository;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn request(username: &str, password: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            name: "Ana Perez".into(),
            password: password.map(str::to_string),
            roles: Some("ADMIN".into()),
        }
    }

    #[tokio::test]
    async fn stores_argon2_hash_instead_of_plaintext() {
        let repo = InMemoryUserRepository::new();
        let uc = CreateUser { repo: &repo };

        let user = uc.execute(&request("ana", Some("s3cret"))).await.unwrap();

        let stored = user.password().unwrap();
        assert_ne!(stored, "s3cret");
        let parsed = PasswordHash::new(stored).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"s3cret", &parsed)
                .is_ok()
        );
        assert_eq!(user.roles(), Some("ADMIN"));
    }

    #[tokio::test]
    async fn missing_password_leaves_credential_empty() {
        let repo = InMemoryUserRepository::new();
        let uc = CreateUser { repo: &repo };

        let user = uc.execute(&request("ana", None)).await.unwrap();
        assert!(user.password().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_surfaces_store_error() {
        let repo = InMemoryUserRepository::new();
        let uc = CreateUser { repo: &repo };

        uc.execute(&request("ana", None)).await.unwrap();
        let err = uc.execute(&request("ana", Some("x"))).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateUsername(ref u) if u == "ana"));
    }
}
