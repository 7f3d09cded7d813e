use thiserror::Error;

use crate::domain::auth::errors::RepositoryError;

/// Errors for the ad lifecycle
#[derive(Debug, Error)]
pub enum AdsError {
  #[error("Title is too long")]
  TitleTooLong,

  #[error("Description is too long")]
  DescriptionTooLong,

  #[error("Price is invalid")]
  InvalidPrice,

  #[error("Limit is invalid")]
  InvalidLimit,

  #[error("Offset is invalid")]
  InvalidOffset,

  #[error("Ads not found")]
  NotFound,

  #[error("User is not the owner")]
  Forbidden,

  #[error("Author not found")]
  AuthorNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for AdsError {
  fn from(error: sqlx::Error) -> Self {
    AdsError::Repository(RepositoryError::from(error))
  }
}
