/// Domain models for the accounts service
///
/// Each model module holds:
/// - the stored entity (`sqlx::FromRow`)
/// - the payload the storage layer inserts
/// - the request inputs accepted from callers (`validator::Validate`)
/// - the response shape returned to callers
///
/// # Models
///
/// - `user`: User accounts keyed by national ID (rut)
/// - `address`: Shipping addresses owned by a user
///
/// # Example
///
/// ```
/// use accounts_shared::models::user::{User, UserResponse};
/// use chrono::Utc;
///
/// let user = User {
///     rut: "11111111-1".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Rojas".to_string(),
///     email: "ana@x.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// let response = UserResponse::from(user);
/// assert_eq!(response.first_name, "Ana");
/// ```

pub mod address;
pub mod user;
