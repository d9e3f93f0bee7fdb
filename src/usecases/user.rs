//! User management use-cases

use super::owned_client;
use crate::core::{BillingError, ClientRepository, Entity, PasswordHasher, UserRepository};
use crate::entities::user::normalize_email;
use crate::entities::{Client, User};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Payload for signing up
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    #[validate(length(min = 1, max = 120, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
}

/// Payload for logging in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Partial update of the user's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 120, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub company_name: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
}

/// Registers a new account
pub struct CreateUser {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl CreateUser {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: SignupInput) -> Result<User, BillingError> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(BillingError::conflict(format!(
                "A user with email '{}' already exists",
                email
            )));
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let mut user = User::new(input.name, &email, password_hash);
        user.phone = input.phone;
        user.company_name = input.company_name;
        user.address = input.address;

        let user = self.users.create(user).await?;

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user.public())
    }
}

/// Verifies credentials; the controller issues tokens for the returned user
pub struct LoginUser {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl LoginUser {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: LoginInput) -> Result<User, BillingError> {
        input.validate()?;

        let invalid = || BillingError::unauthorized("Invalid email or password");

        let user = self
            .users
            .find_by_email(&normalize_email(&input.email))
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify(&input.password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(invalid());
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user.public())
    }
}

/// Loads the authenticated user's profile
pub struct GetUserProfile {
    users: Arc<dyn UserRepository>,
}

impl GetUserProfile {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<User, BillingError> {
        self.users
            .get(&user_id)
            .await?
            .map(|user| user.public())
            .ok_or_else(|| BillingError::not_found(User::resource_name_singular(), user_id))
    }
}

/// Applies a partial update to the authenticated user's profile
pub struct UpdateUser {
    users: Arc<dyn UserRepository>,
}

impl UpdateUser {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: UpdateUserInput, user_id: Uuid) -> Result<User, BillingError> {
        input.validate()?;

        let mut user = self
            .users
            .get(&user_id)
            .await?
            .ok_or_else(|| BillingError::not_found(User::resource_name_singular(), user_id))?;

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(phone) = input.phone {
            user.phone = Some(phone);
        }
        if let Some(company_name) = input.company_name {
            user.company_name = Some(company_name);
        }
        if let Some(address) = input.address {
            user.address = Some(address);
        }
        user.touch();

        let user = self.users.update(&user_id, user).await?;

        tracing::info!(user_id = %user_id, "user profile updated");
        Ok(user.public())
    }
}

/// Lists every client the authenticated user owns
pub struct GetMyClients {
    clients: Arc<dyn ClientRepository>,
}

impl GetMyClients {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Client>, BillingError> {
        Ok(self.clients.list_by_user(&user_id).await?)
    }
}

/// Loads one of the authenticated user's clients
pub struct GetSingleClient {
    clients: Arc<dyn ClientRepository>,
}

impl GetSingleClient {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn execute(&self, client_id: Uuid, user_id: Uuid) -> Result<Client, BillingError> {
        owned_client(self.clients.as_ref(), &client_id, &user_id).await
    }
}
