/// Storage ports
///
/// Services depend on these traits, never on a concrete backend. Two
/// implementations exist:
///
/// - `memory`: a process-local store, used for tests and `STORAGE_BACKEND=memory`
/// - `postgres`: the `users` / `shipping_addresses` tables via sqlx
///
/// Both backends uphold the same rules: rut and email are unique, every
/// address has an existing owner, and deleting a user deletes its addresses.
///
/// # Example
///
/// ```
/// use accounts_shared::repository::{memory::MemoryStore, UserRepository};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), accounts_shared::repository::RepositoryError> {
/// let store = MemoryStore::new();
/// let users: Arc<dyn UserRepository> = Arc::new(store.clone());
///
/// assert!(!users.exists("11111111-1").await?);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::{
    address::{Address, AddressInput},
    user::{NewUser, User},
};
use async_trait::async_trait;

/// PostgreSQL SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique key (rut or email) is already taken
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint, e.g. `users_pkey`
        constraint: String,
    },

    /// Any other backend failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return RepositoryError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }

        RepositoryError::Database(err)
    }
}

/// Result alias for storage operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Access to the `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by national ID
    async fn find_by_rut(&self, rut: &str) -> RepositoryResult<Option<User>>;

    /// Returns every user, ordered by rut
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Whether a user with this rut exists
    async fn exists(&self, rut: &str) -> RepositoryResult<bool>;

    /// Inserts a new user
    ///
    /// Fails with `UniqueViolation` if the rut or the email is taken.
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    /// Overwrites the name fields of an existing user
    ///
    /// Returns `None` if no user has this rut.
    async fn update_names(
        &self,
        rut: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Option<User>>;

    /// Deletes a user and all of its addresses
    ///
    /// Returns false if no user had this rut.
    async fn delete(&self, rut: &str) -> RepositoryResult<bool>;

    /// Checks that the backend is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}

/// Access to the `shipping_addresses` table
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Finds an address by its surrogate key
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Address>>;

    /// Returns the addresses owned by a user, ordered by id
    async fn find_by_owner(&self, rut: &str) -> RepositoryResult<Vec<Address>>;

    /// Inserts an address for an existing user
    ///
    /// The owner check and the insert are one atomic unit. Returns `None`
    /// (and stores nothing) if the owner does not exist.
    async fn insert_for_owner(
        &self,
        rut: &str,
        input: AddressInput,
    ) -> RepositoryResult<Option<Address>>;

    /// Overwrites the fields of an address, keeping its owner
    ///
    /// Returns `None` if no address has this id.
    async fn update(&self, id: i64, input: AddressInput) -> RepositoryResult<Option<Address>>;

    /// Deletes an address
    ///
    /// Returns false if no address had this id.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}
