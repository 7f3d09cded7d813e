use thiserror::Error;

use crate::domain::auth::errors::RepositoryError;

/// Errors for ad image attachment and retrieval
#[derive(Debug, Error)]
pub enum ImageError {
  #[error("Ad not found")]
  AdNotFound,

  #[error("Image not found")]
  ImageNotFound,

  #[error("Unsupported file type")]
  UnsupportedFileType,

  #[error("Blob storage error: {0}")]
  Storage(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for ImageError {
  fn from(error: sqlx::Error) -> Self {
    ImageError::Repository(RepositoryError::from(error))
  }
}
