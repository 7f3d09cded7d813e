use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::RegistrationService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub username: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

/// Response after successful registration. Carries the server-assigned id
/// and timestamp; the password hash is never part of it.
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: Uuid,
  pub username: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  registration: Arc<RegistrationService>,
}

impl RegisterUserUseCase {
  pub fn new(registration: Arc<RegistrationService>) -> Self {
    Self { registration }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for a malformed email or a password
  /// failing the strength policy (first violated rule wins), and
  /// `AuthError::EmailAlreadyExists` for a duplicate address.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self
      .registration
      .register(command.username, email, password)
      .await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      username: user.username,
      email: user.email,
      created_at: user.created_at,
    })
  }
}
