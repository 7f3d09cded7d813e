use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::ads::errors::AdsError;
use crate::domain::auth::errors::AuthError;
use crate::domain::images::errors::ImageError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses.
///
/// Internal failures carry their detail only into the log; the response
/// body is always a generic message.
#[derive(Debug, Serialize)]
pub enum ApiError {
  /// Bad input shape or policy violation (400)
  Validation(String),

  /// Missing, invalid or expired credential (401)
  Unauthorized(String),

  /// Authenticated but not authorized (403)
  Forbidden(String),

  /// Entity absent (404)
  NotFound(String),

  /// Email already registered (409)
  Conflict(String),

  /// Upload payload is not an accepted image format (415)
  UnsupportedMediaType(String),

  /// Storage/crypto/unexpected failure (500)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::UnsupportedMediaType(msg) => write!(f, "Unsupported media type: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Unauthorized(msg) => ("unauthorized", msg.clone()),
      ApiError::Forbidden(msg) => ("forbidden", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::UnsupportedMediaType(msg) => ("unsupported_media_type", msg.clone()),
      ApiError::Internal(msg) => {
        // Never expose internal error details to the caller
        tracing::error!("Internal error: {}", msg);
        ("internal_error", "internal server error".to_string())
      }
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
      })
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::UserNotFound => ApiError::NotFound("user not found".to_string()),
      AuthError::IncorrectPassword => ApiError::Unauthorized("incorrect password".to_string()),
      AuthError::EmailAlreadyExists => ApiError::Conflict("email already exists".to_string()),
      AuthError::SessionExpired => ApiError::Unauthorized("session expired".to_string()),
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => ApiError::Internal(err.to_string()),
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert AdsError to ApiError
impl From<AdsError> for ApiError {
  fn from(error: AdsError) -> Self {
    match error {
      AdsError::NotFound => ApiError::NotFound("ads not found".to_string()),
      AdsError::Forbidden => {
        ApiError::Forbidden("you are not the owner of this ad".to_string())
      }
      AdsError::TitleTooLong
      | AdsError::DescriptionTooLong
      | AdsError::InvalidPrice
      | AdsError::InvalidLimit
      | AdsError::InvalidOffset => ApiError::Validation(error.to_string()),
      AdsError::AuthorNotFound => ApiError::Internal(error.to_string()),
      AdsError::Repository(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert ImageError to ApiError
impl From<ImageError> for ApiError {
  fn from(error: ImageError) -> Self {
    match error {
      ImageError::AdNotFound => ApiError::NotFound("ad not found".to_string()),
      ImageError::ImageNotFound => ApiError::NotFound("image not found".to_string()),
      ImageError::UnsupportedFileType => {
        ApiError::UnsupportedMediaType("unsupported image type".to_string())
      }
      ImageError::Storage(err) => ApiError::Internal(err),
      ImageError::Repository(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from the validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("x".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Unauthorized("x".to_string()).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Forbidden("x".to_string()).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::NotFound("x".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Conflict("x".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::UnsupportedMediaType("x".to_string()).status_code(),
      StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
      ApiError::Internal("x".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::UserNotFound.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = AuthError::IncorrectPassword.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    // Storage detail never picks a client-facing status
    let api_error: ApiError =
      AuthError::Repository(RepositoryError::QueryFailed("boom".to_string())).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_ads_error_conversion() {
    let api_error: ApiError = AdsError::Forbidden.into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);

    let api_error: ApiError = AdsError::NotFound.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = AdsError::TitleTooLong.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_image_error_conversion() {
    let api_error: ApiError = ImageError::UnsupportedFileType.into();
    assert_eq!(api_error.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let api_error: ApiError = ImageError::AdNotFound.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);
  }
}
