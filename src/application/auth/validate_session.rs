use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for resolving the acting user from an Authorization header.
/// Called by the auth middleware before protected handlers run.
pub struct ValidateSessionUseCase {
  auth_service: Arc<AuthService>,
}

impl ValidateSessionUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Accepts the raw header value (`Bearer <token>` or a bare token) and
  /// returns the session's user id, rotating the session when it has
  /// expired.
  pub async fn execute(&self, raw_token: &str) -> Result<Uuid, AuthError> {
    self.auth_service.validate_session(raw_token).await
  }
}
