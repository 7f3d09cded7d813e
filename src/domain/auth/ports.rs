use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Password, PasswordHash};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their email address (exact, case-sensitive match)
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

  /// Existence probe used by registration to enforce email uniqueness
  async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;
}

/// Repository trait for session persistence operations.
///
/// A user has at most one session row; the storage layer enforces this with
/// a uniqueness constraint on user_id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Creates a new session in the repository
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  /// Finds a session by its token. The backing query filters out expired
  /// rows, so an expired session and a missing one are indistinguishable.
  async fn find_by_token(&self, token: &str) -> Result<Option<Session>, AuthError>;

  /// Finds the session belonging to a user, expired or not
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Session>, AuthError>;

  /// Existence probe: does this user currently hold a session row?
  async fn exists_for_user(&self, user_id: Uuid) -> Result<bool, AuthError>;

  /// Overwrites the single session row for session.user_id with the given
  /// token and timestamps
  async fn rotate(&self, session: &Session) -> Result<Session, AuthError>;

  /// Deletes a session by its token
  async fn delete_by_token(&self, token: &str) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a policy-checked password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(&self, password: &str, hashed_password: &PasswordHash)
  -> Result<bool, AuthError>;
}

/// Service trait for opaque bearer token generation
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a unique random token
  async fn generate(&self) -> Result<String, AuthError>;
}
