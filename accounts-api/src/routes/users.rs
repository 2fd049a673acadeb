/// User account endpoints
///
/// # Endpoints
///
/// - `POST /api/v1/users` - Create user
/// - `GET /api/v1/users` - List users
/// - `GET /api/v1/users/:rut` - Get user
/// - `PUT /api/v1/users/:rut` - Update first and last name
/// - `DELETE /api/v1/users/:rut` - Delete user and its addresses
///
/// Responses never include the password or its hash.

use super::location;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};
use accounts_shared::models::user::{CreateUser, UpdateUser, UserResponse};
use axum::{
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Create user
///
/// # Request
///
/// ```json
/// {
///   "rut": "11111111-1",
///   "first_name": "Ana",
///   "last_name": "Rojas",
///   "email": "ana@x.com",
///   "password": "secret"
/// }
/// ```
///
/// # Response
///
/// 201 with the user and `Location: /api/v1/users/11111111-1`.
///
/// # Errors
///
/// - 400: Validation failed
/// - 409: rut or email already registered
pub async fn create_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(req): ApiJson<CreateUser>,
) -> ApiResult<(StatusCode, HeaderMap, Json<UserResponse>)> {
    let user = state.users.create(req).await?;
    let headers = location(&uri, &user.rut);

    Ok((StatusCode::CREATED, headers, Json(user)))
}

/// List users
///
/// 200 with an array, or 204 when there are no users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Response> {
    let users = state.users.list().await?;

    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(users).into_response())
}

/// Get user
///
/// # Errors
///
/// - 404: No user with this rut
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(rut): ApiPath<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .get(&rut)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", rut)))?;

    Ok(Json(user))
}

/// Update user
///
/// Only `first_name` and `last_name` are read; email and password stay as
/// they were.
///
/// # Errors
///
/// - 400: Validation failed
/// - 404: No user with this rut
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(rut): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.update(&rut, req).await?;
    Ok(Json(user))
}

/// Delete user
///
/// Also deletes every address of the user.
///
/// # Errors
///
/// - 404: No user with this rut
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(rut): ApiPath<String>,
) -> ApiResult<StatusCode> {
    state.users.delete(&rut).await?;
    Ok(StatusCode::NO_CONTENT)
}
