/// Shipping address model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE shipping_addresses (
///     id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
///     street VARCHAR(255) NOT NULL,
///     number VARCHAR(255) NOT NULL,
///     district VARCHAR(255) NOT NULL,
///     city VARCHAR(255) NOT NULL,
///     user_rut VARCHAR(10) NOT NULL REFERENCES users(rut) ON DELETE CASCADE
/// );
/// ```
///
/// Ownership is the `user_rut` foreign key. Addresses are always created for
/// an existing user and disappear with it.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored shipping address
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Address {
    /// Surrogate key, assigned by storage
    pub id: i64,

    pub street: String,

    /// Street number, kept as text ("10", "10B", "s/n")
    pub number: String,

    pub district: String,

    pub city: String,

    /// Owning user's national ID
    pub user_rut: String,
}

impl Address {
    /// Whether this address belongs to the given user
    pub fn is_owned_by(&self, rut: &str) -> bool {
        self.user_rut == rut
    }
}

/// Address request body, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1, max = 255, message = "street is required"))]
    pub street: String,

    #[validate(length(min = 1, max = 255, message = "number is required"))]
    pub number: String,

    #[validate(length(min = 1, max = 255, message = "district is required"))]
    pub district: String,

    #[validate(length(min = 1, max = 255, message = "city is required"))]
    pub city: String,
}

/// Address as returned to callers, without the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            number: address.number,
            district: address.district,
            city: address.city,
        }
    }
}
