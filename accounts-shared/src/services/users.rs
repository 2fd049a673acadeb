/// User management rules
///
/// - rut and email are unique; duplicates are a conflict
/// - passwords are hashed before they reach storage
/// - only the name fields can change after creation
/// - deleting a user deletes its addresses

use super::error::{ServiceError, ServiceResult};
use crate::{
    auth::password,
    models::user::{CreateUser, NewUser, UpdateUser, UserResponse},
    repository::UserRepository,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Creates a user
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is blank or the rut is longer than 10 characters
    /// - `Conflict` if the rut or the email is already registered; the
    ///   existing user is left untouched
    pub async fn create(&self, input: CreateUser) -> ServiceResult<UserResponse> {
        input.validate()?;

        if self.users.exists(&input.rut).await? {
            return Err(ServiceError::Conflict(format!(
                "User with rut '{}' already exists",
                input.rut
            )));
        }

        let plaintext = input.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .users
            .insert(NewUser {
                rut: input.rut,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
            })
            .await?;

        info!(rut = %user.rut, "Created user");
        Ok(user.into())
    }

    /// Looks up a user; a missing user is `Ok(None)`
    pub async fn get(&self, rut: &str) -> ServiceResult<Option<UserResponse>> {
        Ok(self.users.find_by_rut(rut).await?.map(UserResponse::from))
    }

    /// All users, ordered by rut
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Changes a user's first and last name
    ///
    /// Email and password hash are never touched.
    pub async fn update(&self, rut: &str, input: UpdateUser) -> ServiceResult<UserResponse> {
        input.validate()?;

        let user = self
            .users
            .update_names(rut, &input.first_name, &input.last_name)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(rut))?;

        info!(rut = %rut, "Updated user");
        Ok(user.into())
    }

    /// Deletes a user together with its addresses
    pub async fn delete(&self, rut: &str) -> ServiceResult<()> {
        if !self.users.delete(rut).await? {
            return Err(ServiceError::user_not_found(rut));
        }

        info!(rut = %rut, "Deleted user");
        Ok(())
    }
}
