use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::id_sequence::IdSequence;
use crate::application::ports::user_repository::{NewUser, RepositoryError, UserRepository};
use crate::domain::users::user::{NAME_MAX_LEN, USERNAME_MAX_LEN, User};
use crate::infrastructure::db::PgPool;

const PRIMARY_KEY_CONSTRAINT: &str = "usuario_pkey";

pub struct SqlxUserRepository {
    pub pool: PgPool,
    sequence: Arc<dyn IdSequence>,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool, sequence: Arc<dyn IdSequence>) -> Self {
        Self { pool, sequence }
    }
}

fn storage(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(err.into())
}

/// Translates constraint violations raised by a write of `username`/`name`.
fn map_write_error(err: sqlx::Error, username: &str, name: &str) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.constraint() != Some(PRIMARY_KEY_CONSTRAINT) {
            return RepositoryError::DuplicateUsername(username.to_string());
        }
        // string_data_right_truncation
        if db.code().as_deref() == Some("22001") {
            return if username.chars().count() > USERNAME_MAX_LEN {
                RepositoryError::ValueTooLong {
                    column: "usuario",
                    max: USERNAME_MAX_LEN,
                }
            } else {
                RepositoryError::ValueTooLong {
                    column: "nombre",
                    max: NAME_MAX_LEN,
                }
            };
        }
    }
    tracing::error!(error = ?err, "usuario_write_failed");
    storage(err)
}

fn user_from_row(row: &PgRow) -> Result<User, RepositoryError> {
    let username: Option<String> = row.try_get("usuario").map_err(storage)?;
    let name: Option<String> = row.try_get("nombre").map_err(storage)?;
    Ok(User::from_row(
        row.try_get("id").map_err(storage)?,
        username.unwrap_or_default(),
        name.unwrap_or_default(),
        row.try_get("clave").map_err(storage)?,
        row.try_get("roles").map_err(storage)?,
    ))
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let id = self.sequence.next_id().await?;
        let row = sqlx::query(
            r#"INSERT INTO usuario (id, usuario, nombre, clave, roles) VALUES ($1, $2, $3, $4, $5)
               RETURNING id, usuario, nombre, clave, roles"#,
        )
        .bind(id)
        .bind(&new_user.username)
        .bind(&new_user.name)
        .bind(new_user.password_hash.as_deref())
        .bind(new_user.roles.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &new_user.username, &new_user.name))?;
        user_from_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(r#"SELECT id, usuario, nombre, clave, roles FROM usuario WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, usuario, nombre, clave, roles FROM usuario WHERE usuario = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows =
            sqlx::query(r#"SELECT id, usuario, nombre, clave, roles FROM usuario ORDER BY id ASC"#)
                .fetch_all(&self.pool)
                .await
                .map_err(storage)?;
        rows.iter().map(user_from_row).collect()
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        let res =
            sqlx::query(r#"UPDATE usuario SET usuario = $2, nombre = $3, roles = $4 WHERE id = $1"#)
                .bind(user.id())
                .bind(user.username())
                .bind(user.name())
                .bind(user.roles())
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error(e, user.username(), user.name()))?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let res = sqlx::query("DELETE FROM usuario WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(res.rows_affected() > 0)
    }
}
