use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case and returns the bearer token.
  ///
  /// Only the email is shape-validated here; the password is checked
  /// against the stored hash, not against the registration policy.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<String, AuthError> {
    let email = Email::new(command.email)?;

    self.auth_service.login(email, &command.password).await
  }
}
