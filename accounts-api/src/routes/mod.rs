/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User account endpoints
/// - `addresses`: Shipping address endpoints, nested under a user

pub mod addresses;
pub mod health;
pub mod users;

use axum::http::{header, HeaderMap, HeaderValue, Uri};
use std::fmt::Display;

/// `Location` header for a resource created under the collection at `uri`
///
/// Uses the original request path so it stays correct under nested routers.
/// A key that cannot form a header value yields no header.
fn location(uri: &Uri, key: impl Display) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("{}/{}", uri.path().trim_end_matches('/'), key);

    match HeaderValue::try_from(value) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
        }
        Err(e) => tracing::warn!(error = %e, "Skipping Location header"),
    }

    headers
}
