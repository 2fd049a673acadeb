/// Shipping address rules
///
/// Every operation is scoped to the owning user named by the caller. An
/// address that exists but belongs to someone else is reported exactly like
/// a missing one, so ids of other users' addresses are not disclosed.

use super::error::{ServiceError, ServiceResult};
use crate::{
    models::address::{Address, AddressInput, AddressResponse},
    repository::{AddressRepository, UserRepository},
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct AddressService {
    users: Arc<dyn UserRepository>,
    addresses: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(users: Arc<dyn UserRepository>, addresses: Arc<dyn AddressRepository>) -> Self {
        Self { users, addresses }
    }

    async fn find_owned(&self, rut: &str, id: i64) -> ServiceResult<Option<Address>> {
        let address = self.addresses.find_by_id(id).await?;
        Ok(address.filter(|a| a.is_owned_by(rut)))
    }

    /// Adds an address to an existing user
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist; nothing is stored in that case.
    pub async fn add(&self, rut: &str, input: AddressInput) -> ServiceResult<AddressResponse> {
        input.validate()?;

        let address = self
            .addresses
            .insert_for_owner(rut, input)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(rut))?;

        info!(rut = %rut, address_id = address.id, "Added address");
        Ok(address.into())
    }

    /// Addresses of a user, ordered by id
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist. A user without addresses is an
    /// empty list.
    pub async fn list(&self, rut: &str) -> ServiceResult<Vec<AddressResponse>> {
        if !self.users.exists(rut).await? {
            return Err(ServiceError::user_not_found(rut));
        }

        let addresses = self.addresses.find_by_owner(rut).await?;
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    /// One address of a user; missing or foreign is `Ok(None)`
    pub async fn get(&self, rut: &str, id: i64) -> ServiceResult<Option<AddressResponse>> {
        Ok(self.find_owned(rut, id).await?.map(AddressResponse::from))
    }

    /// Overwrites street, number, district and city; the owner never changes
    pub async fn update(
        &self,
        rut: &str,
        id: i64,
        input: AddressInput,
    ) -> ServiceResult<AddressResponse> {
        input.validate()?;

        if self.find_owned(rut, id).await?.is_none() {
            return Err(ServiceError::address_not_found(rut, id));
        }

        let address = self
            .addresses
            .update(id, input)
            .await?
            .ok_or_else(|| ServiceError::address_not_found(rut, id))?;

        info!(rut = %rut, address_id = id, "Updated address");
        Ok(address.into())
    }

    /// Deletes one address; the owner is unaffected
    pub async fn delete(&self, rut: &str, id: i64) -> ServiceResult<()> {
        if self.find_owned(rut, id).await?.is_none() {
            return Err(ServiceError::address_not_found(rut, id));
        }

        if !self.addresses.delete(id).await? {
            return Err(ServiceError::address_not_found(rut, id));
        }

        info!(rut = %rut, address_id = id, "Deleted address");
        Ok(())
    }
}
