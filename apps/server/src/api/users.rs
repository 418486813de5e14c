use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{LoginRequest, MessageResponse, NewUser, User, UserResponse, UserUpdate},
};

#[utoipa::path(post, path = "/api/v1/register", request_body = NewUser, responses((status = 201, body = UserResponse)))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.register(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User registered successfully.".to_string(),
            user: User::from(user),
        }),
    ))
}

#[utoipa::path(post, path = "/api/v1/login", request_body = LoginRequest, responses((status = 200, body = UserResponse)))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.login(payload.into()).await?;
    Ok(Json(UserResponse {
        message: "Login successful.".to_string(),
        user: User::from(user),
    }))
}

/// Sessions are not tracked, so logging out only acknowledges the request.
#[utoipa::path(post, path = "/api/v1/logout", responses((status = 200, body = MessageResponse)))]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully."))
}

#[utoipa::path(get, path = "/api/v1/users", responses((status = 200, body = [User])))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(users.into_iter().map(User::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/users", request_body = NewUser, responses((status = 201, body = User)))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(User::from(user))))
}

#[utoipa::path(get, path = "/api/v1/users/{id}", responses((status = 200, body = User)))]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(User::from(user)))
}

#[utoipa::path(put, path = "/api/v1/users/{id}", request_body = UserUpdate, responses((status = 200, body = User)))]
pub async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.update_user(payload.into_core(id)).await?;
    Ok(Json(User::from(user)))
}

#[utoipa::path(delete, path = "/api/v1/users/{id}", responses((status = 204)))]
pub async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
