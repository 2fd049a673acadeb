/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     rut VARCHAR(10) PRIMARY KEY,
///     first_name VARCHAR(255) NOT NULL,
///     last_name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// Email and password are fixed at creation. Only the name fields can be
/// changed afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// A rut is used verbatim as a URL path segment: digits, letters, `-` and `.`
fn validate_rut(rut: &str) -> Result<(), ValidationError> {
    let valid = rut
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    if !valid {
        let mut err = ValidationError::new("rut_format");
        err.message = Some(Cow::Borrowed(
            "rut may only contain letters, digits, '-' and '.'",
        ));
        return Err(err);
    }
    Ok(())
}

/// Stored user account
///
/// Never serialized to callers directly; map it to [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// National ID, primary key
    pub rut: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address, unique across users
    pub email: String,

    /// Argon2id PHC string
    pub password_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the name fields last changed
    pub updated_at: DateTime<Utc>,
}

/// Row inserted by the storage layer
///
/// Carries the already hashed password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Create-user request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    /// National ID
    #[validate(
        length(min = 1, max = 10, message = "rut must be 1-10 characters"),
        custom(function = "validate_rut")
    )]
    pub rut: String,

    #[validate(length(min = 1, max = 255, message = "first_name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "last_name is required"))]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Update-user request body
///
/// Email and password are deliberately absent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "first_name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "last_name is required"))]
    pub last_name: String,
}

/// User as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            rut: user.rut,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
