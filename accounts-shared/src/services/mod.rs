/// Business rules
///
/// Services sit between the HTTP handlers and the storage ports. They
/// validate input, enforce existence and ownership rules, hash passwords and
/// map entities to response shapes.
///
/// # Example
///
/// ```
/// use accounts_shared::models::user::CreateUser;
/// use accounts_shared::repository::memory::MemoryStore;
/// use accounts_shared::services::{AddressService, UserService};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), accounts_shared::services::ServiceError> {
/// let store = MemoryStore::new();
/// let users = UserService::new(Arc::new(store.clone()));
/// let addresses = AddressService::new(Arc::new(store.clone()), Arc::new(store));
///
/// let ana = users
///     .create(CreateUser {
///         rut: "11111111-1".to_string(),
///         first_name: "Ana".to_string(),
///         last_name: "Rojas".to_string(),
///         email: "ana@x.com".to_string(),
///         password: "secret".to_string(),
///     })
///     .await?;
///
/// assert!(addresses.list(&ana.rut).await?.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod addresses;
pub mod error;
pub mod users;

pub use addresses::AddressService;
pub use error::{ServiceError, ServiceResult};
pub use users::UserService;
