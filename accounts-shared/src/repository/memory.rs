/// In-memory storage backend
///
/// Both tables live behind a single `RwLock`, so every operation (including
/// the user → address cascade) is atomic with respect to the others.
/// Clones share the same tables.

use super::{AddressRepository, RepositoryError, RepositoryResult, UserRepository};
use crate::models::{
    address::{Address, AddressInput},
    user::{NewUser, User},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<String, User>,
    addresses: BTreeMap<i64, Address>,
    last_address_id: i64,
}

/// Process-local implementation of both storage ports
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_rut(&self, rut: &str) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(rut).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn exists(&self, rut: &str) -> RepositoryResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.contains_key(rut))
    }

    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(&user.rut) {
            return Err(RepositoryError::UniqueViolation {
                constraint: "users_pkey".to_string(),
            });
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::UniqueViolation {
                constraint: "users_email_key".to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            rut: user.rut,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.rut.clone(), user.clone());

        tracing::debug!(rut = %user.rut, "Inserted user");
        Ok(user)
    }

    async fn update_names(
        &self,
        rut: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Option<User>> {
        let mut tables = self.tables.write().await;

        let Some(user) = tables.users.get_mut(rut) else {
            return Ok(None);
        };
        user.first_name = first_name.to_string();
        user.last_name = last_name.to_string();
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, rut: &str) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.users.remove(rut).is_none() {
            return Ok(false);
        }

        let before = tables.addresses.len();
        tables.addresses.retain(|_, address| !address.is_owned_by(rut));
        let removed = before - tables.addresses.len();

        tracing::debug!(rut = %rut, removed_addresses = removed, "Deleted user");
        Ok(true)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Address>> {
        let tables = self.tables.read().await;
        Ok(tables.addresses.get(&id).cloned())
    }

    async fn find_by_owner(&self, rut: &str) -> RepositoryResult<Vec<Address>> {
        let tables = self.tables.read().await;
        Ok(tables
            .addresses
            .values()
            .filter(|address| address.is_owned_by(rut))
            .cloned()
            .collect())
    }

    async fn insert_for_owner(
        &self,
        rut: &str,
        input: AddressInput,
    ) -> RepositoryResult<Option<Address>> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(rut) {
            return Ok(None);
        }

        tables.last_address_id += 1;
        let address = Address {
            id: tables.last_address_id,
            street: input.street,
            number: input.number,
            district: input.district,
            city: input.city,
            user_rut: rut.to_string(),
        };
        tables.addresses.insert(address.id, address.clone());

        tracing::debug!(rut = %rut, address_id = address.id, "Inserted address");
        Ok(Some(address))
    }

    async fn update(&self, id: i64, input: AddressInput) -> RepositoryResult<Option<Address>> {
        let mut tables = self.tables.write().await;

        let Some(address) = tables.addresses.get_mut(&id) else {
            return Ok(None);
        };
        address.street = input.street;
        address.number = input.number;
        address.district = input.district;
        address.city = input.city;

        Ok(Some(address.clone()))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.addresses.remove(&id).is_some())
    }
}
