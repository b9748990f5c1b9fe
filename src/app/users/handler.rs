//! 用户处理器

use axum::{
    extract::{Path, State},
    response::Json,
};

use super::{
    model::{CreateUserRequest, UpdateUserRequest, User, UserId, UserResponse},
    service::UserService,
};
use crate::core::{error::CoreError, extract::JsonBody, response::MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    Ok(Json(state.user_service.list_users()?))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<Json<UserResponse>, CoreError> {
    let user = state.user_service.create_user(payload)?;
    Ok(Json(UserResponse {
        message: "New user created".to_string(),
        user,
    }))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, CoreError> {
    let id = UserId::parse(&raw_id);
    let user = state.user_service.update_user(id, payload)?;
    Ok(Json(UserResponse {
        message: format!("User with id {id} updated"),
        user,
    }))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    let id = UserId::parse(&raw_id);
    state.user_service.delete_user(id)?;
    Ok(Json(MessageResponse::new(format!(
        "User with id {id} deleted successfully"
    ))))
}
