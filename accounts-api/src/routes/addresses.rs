/// Shipping address endpoints
///
/// Every route is nested under the owning user. An address id that belongs
/// to a different user answers 404, the same as an unknown id.
///
/// # Endpoints
///
/// - `POST /api/v1/users/:rut/addresses` - Add address
/// - `GET /api/v1/users/:rut/addresses` - List addresses
/// - `GET /api/v1/users/:rut/addresses/:address_id` - Get address
/// - `PUT /api/v1/users/:rut/addresses/:address_id` - Update address
/// - `DELETE /api/v1/users/:rut/addresses/:address_id` - Delete address

use super::location;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};
use accounts_shared::models::address::{AddressInput, AddressResponse};
use axum::{
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Add address
///
/// # Request
///
/// ```json
/// { "street": "Main", "number": "10", "district": "D1", "city": "C1" }
/// ```
///
/// # Response
///
/// 201 with the address, including its generated `id`, and a `Location`
/// header pointing at it.
///
/// # Errors
///
/// - 400: Validation failed
/// - 404: No user with this rut
pub async fn add_address(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(rut): ApiPath<String>,
    ApiJson(req): ApiJson<AddressInput>,
) -> ApiResult<(StatusCode, HeaderMap, Json<AddressResponse>)> {
    let address = state.addresses.add(&rut, req).await?;
    let headers = location(&uri, address.id);

    Ok((StatusCode::CREATED, headers, Json(address)))
}

/// List addresses
///
/// 200 with an array ordered by id, or 204 when the user has none.
///
/// # Errors
///
/// - 404: No user with this rut
pub async fn list_addresses(
    State(state): State<AppState>,
    ApiPath(rut): ApiPath<String>,
) -> ApiResult<Response> {
    let addresses = state.addresses.list(&rut).await?;

    if addresses.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(addresses).into_response())
}

/// Get address
///
/// # Errors
///
/// - 404: No such address for this user
pub async fn get_address(
    State(state): State<AppState>,
    ApiPath((rut, address_id)): ApiPath<(String, i64)>,
) -> ApiResult<Json<AddressResponse>> {
    let address = state
        .addresses
        .get(&rut, address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {} not found", address_id)))?;

    Ok(Json(address))
}

/// Update address
///
/// Replaces street, number, district and city.
///
/// # Errors
///
/// - 400: Validation failed
/// - 404: No such address for this user
pub async fn update_address(
    State(state): State<AppState>,
    ApiPath((rut, address_id)): ApiPath<(String, i64)>,
    ApiJson(req): ApiJson<AddressInput>,
) -> ApiResult<Json<AddressResponse>> {
    let address = state.addresses.update(&rut, address_id, req).await?;
    Ok(Json(address))
}

/// Delete address
///
/// # Errors
///
/// - 404: No such address for this user
pub async fn delete_address(
    State(state): State<AppState>,
    ApiPath((rut, address_id)): ApiPath<(String, i64)>,
) -> ApiResult<StatusCode> {
    state.addresses.delete(&rut, address_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
