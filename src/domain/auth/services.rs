use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::{AuthError, HashError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, TokenGenerator, UserRepository};
use super::value_objects::{Email, Password, PasswordHash};

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 24 * 60 * 60,
    }
  }
}

/// Authentication service owning login, logout and session validation.
///
/// Session state machine per user: NoSession, Active (now < expires_at),
/// Expired (now >= expires_at). Login creates a session only when none
/// exists; validation rotates an expired session in place; logout deletes
/// the row. Correctness under concurrent requests is delegated to the
/// storage layer's single-row atomicity and its uniqueness constraint on
/// user_id.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      token_generator,
      config,
    }
  }

  fn session_ttl(&self) -> Duration {
    Duration::seconds(self.config.session_ttl_seconds)
  }

  /// Authenticates a user and returns their bearer token.
  ///
  /// When the user already holds a session row, its current token is
  /// returned as-is, without checking or refreshing expiry; a stale token
  /// handed out here is rotated by the next `validate_session` call.
  ///
  /// # Errors
  /// `UserNotFound` for an unknown email, `IncorrectPassword` on a
  /// mismatch, `Validation` for a syntactically invalid email.
  pub async fn login(&self, email: Email, password: &str) -> Result<String, AuthError> {
    let user = self
      .user_repo
      .find_by_email(email.as_str())
      .await?
      .ok_or(AuthError::UserNotFound)?;

    // A hash that no longer parses is corrupt storage, not caller input
    let stored_hash = PasswordHash::from_hash(&user.password_hash)
      .map_err(|_| AuthError::Hash(HashError::InvalidFormat))?;
    let is_valid = self.password_hasher.verify(password, &stored_hash).await?;
    if !is_valid {
      return Err(AuthError::IncorrectPassword);
    }

    // Existence probe, not a fetch
    let exists = self.session_repo.exists_for_user(user.id).await?;

    if !exists {
      let token = self.token_generator.generate().await?;
      let session = Session::with_duration(user.id, token, self.session_ttl());
      let created = self.session_repo.create(session).await?;
      return Ok(created.token);
    }

    let session = self
      .session_repo
      .find_by_user_id(user.id)
      .await?
      .ok_or(AuthError::SessionExpired)?;
    Ok(session.token)
  }

  /// Resolves the acting user id from a raw Authorization header value.
  ///
  /// Accepts either `Bearer <token>` or a bare token. A session the token
  /// lookup no longer sees (deleted or filtered out as expired) surfaces as
  /// `SessionExpired`. A fetched session that turns out to be expired is
  /// rotated in place; the original user id is returned either way.
  pub async fn validate_session(&self, raw_token: &str) -> Result<Uuid, AuthError> {
    let token = raw_token.strip_prefix("Bearer ").unwrap_or(raw_token);

    let mut session = self
      .session_repo
      .find_by_token(token)
      .await?
      .ok_or(AuthError::SessionExpired)?;

    if session.is_expired() {
      let new_token = self.token_generator.generate().await?;
      session.rotate(new_token, self.session_ttl());
      self.session_repo.rotate(&session).await?;
      return Ok(session.user_id);
    }

    Ok(session.user_id)
  }

  /// Deletes the user's session. Fails with `SessionExpired` when the user
  /// holds none.
  pub async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
    let session = self
      .session_repo
      .find_by_user_id(user_id)
      .await?
      .ok_or(AuthError::SessionExpired)?;

    self.session_repo.delete_by_token(&session.token).await
  }
}

/// Registration service: validates and creates new accounts
pub struct RegistrationService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationService {
  pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
    Self {
      user_repo,
      password_hasher,
    }
  }

  /// Creates a new user account.
  ///
  /// Email syntax and the password policy have already been enforced by the
  /// value objects; this checks email uniqueness, hashes the password and
  /// persists the record. The check-then-act race on uniqueness is closed
  /// by the storage constraint; a duplicate-key insert maps to
  /// `EmailAlreadyExists` as well.
  pub async fn register(
    &self,
    username: String,
    email: Email,
    password: Password,
  ) -> Result<User, AuthError> {
    if self.user_repo.email_exists(email.as_str()).await? {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(username, email.into_inner(), password_hash.into_inner());

    match self.user_repo.create(user).await {
      Ok(user) => Ok(user),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(e) => Err(e),
    }
  }
}
