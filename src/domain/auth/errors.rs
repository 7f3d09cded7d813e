use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Errors for registration, login and session handling
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("user not found")]
  UserNotFound,

  #[error("incorrect password")]
  IncorrectPassword,

  #[error("email already exists")]
  EmailAlreadyExists,

  #[error("session expired")]
  SessionExpired,

  #[error(transparent)]
  Repository(#[from] RepositoryError),

  #[error(transparent)]
  Hash(#[from] HashError),

  #[error(transparent)]
  Validation(#[from] ValueObjectError),
}

/// Storage-layer failures, shared by every repository in the crate
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("connection failed: {0}")]
  ConnectionFailed(String),

  #[error("query failed: {0}")]
  QueryFailed(String),

  #[error("record not found")]
  NotFound,

  #[error("duplicate key: {0}")]
  DuplicateKey(String),
}

/// Password hashing and verification failures
#[derive(Debug, Error)]
pub enum HashError {
  #[error("hashing failed: {0}")]
  HashingFailed(String),

  #[error("verification failed: {0}")]
  VerificationFailed(String),

  #[error("stored hash has an invalid format")]
  InvalidFormat,
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        RepositoryError::DuplicateKey(db_err.message().to_string())
      }
      sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
        RepositoryError::ConnectionFailed(error.to_string())
      }
      other => RepositoryError::QueryFailed(other.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
