use crate::application::ports::user_repository::RepositoryError;
use crate::application::use_cases::users::create_user::{
    CreateUser as CreateUserUc, CreateUserRequest as CreateUserDto,
};
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::update_user::{
    UpdateUser as UpdateUserUc, UpdateUserRequest as UpdateUserDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    /// Plaintext; only its Argon2 hash is stored.
    pub password: Option<String>,
    pub roles: Option<String>,
}

/// Omitted fields keep their stored value; `"roles": null` clears roles.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub roles: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub roles: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            roles: user.roles().map(str::to_string),
        }
    }
}

fn present_or_null<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

pub(crate) fn status_for(err: RepositoryError) -> StatusCode {
    match err {
        RepositoryError::DuplicateUsername(_) => StatusCode::CONFLICT,
        RepositoryError::ValueTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RepositoryError::Storage(e) => {
            tracing::error!(error = ?e, "user_storage_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = CreateUserRequest, responses(
    (status = 201, body = UserResponse),
    (status = 409, description = "Username already taken"),
    (status = 422, description = "Username or name longer than 100 characters")
))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), StatusCode> {
    let repo = ctx.user_repo();
    let uc = CreateUserUc {
        repo: repo.as_ref(),
    };
    let dto = CreateUserDto {
        username: req.username,
        name: req.name,
        password: req.password,
        roles: req.roles,
    };
    let user = uc.execute(&dto).await.map_err(status_for)?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(get, path = "/api/users", tag = "Users", responses(
    (status = 200, body = [UserResponse])
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<UserResponse>>, StatusCode> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute().await.map_err(status_for)?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "No user with that id")
    )
)]
pub async fn get_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, StatusCode> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(id)
        .await
        .map_err(status_for)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user.into()))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "No user with that id"),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Username or name longer than 100 characters")
    )
)]
pub async fn update_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, StatusCode> {
    let repo = ctx.user_repo();
    let uc = UpdateUserUc {
        repo: repo.as_ref(),
    };
    let dto = UpdateUserDto {
        username: req.username,
        name: req.name,
        roles: req.roles,
    };
    let user = uc
        .execute(id, &dto)
        .await
        .map_err(status_for)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user.into()))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "No user with that id")
    )
)]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let repo = ctx.user_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
    };
    if uc.execute(id).await.map_err(status_for)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
