use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};
use uuid::Uuid;

use crate::adapters::http::errors::ApiError;
use crate::application::auth::ValidateSessionUseCase;
use crate::domain::auth::errors::AuthError;

/// Identity resolved from a validated session, attached to the request
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

/// Extension trait to read the resolved identity from a request
pub trait RequestIdentity {
  /// The authenticated user id, if the request carried a valid session
  fn identity(&self) -> Option<Uuid>;
}

impl RequestIdentity for actix_web::HttpRequest {
  fn identity(&self) -> Option<Uuid> {
    self.extensions().get::<AuthenticatedUser>().map(|u| u.0)
  }
}

fn unauthorized(message: &str) -> HttpResponse {
  ApiError::Unauthorized(message.to_string()).error_response()
}

/// Authentication middleware for protected routes.
///
/// Requires an `Authorization: Bearer <token>` header, resolves the acting
/// user through session validation (rotating expired sessions) and attaches
/// the identity to request extensions. Responds 401 when the header is
/// absent or malformed, or the session is gone.
pub struct RequireAuth {
  validate: Arc<ValidateSessionUseCase>,
}

impl RequireAuth {
  pub fn new(validate: Arc<ValidateSessionUseCase>) -> Self {
    Self { validate }
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = RequireAuthService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequireAuthService {
      service: Rc::new(service),
      validate: self.validate.clone(),
    }))
  }
}

pub struct RequireAuthService<S> {
  service: Rc<S>,
  validate: Arc<ValidateSessionUseCase>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let validate = self.validate.clone();

    Box::pin(async move {
      let header = raw_authorization(&req);

      let header = match header {
        Some(value) => value,
        None => {
          let (request, _) = req.into_parts();
          let response = unauthorized("token required").map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      if !header.starts_with("Bearer ") {
        let (request, _) = req.into_parts();
        let response = unauthorized("invalid token format").map_into_right_body();
        return Ok(ServiceResponse::new(request, response));
      }

      match validate.execute(&header).await {
        Ok(user_id) => {
          req.extensions_mut().insert(AuthenticatedUser(user_id));
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        Err(AuthError::SessionExpired) => {
          tracing::debug!("Rejected credential: session expired");
          let (request, _) = req.into_parts();
          let response = unauthorized("session expired").map_into_right_body();
          Ok(ServiceResponse::new(request, response))
        }
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          Ok(ServiceResponse::new(request, response))
        }
      }
    })
  }
}

/// Authentication middleware for routes where a session is optional.
///
/// A valid bearer token attaches the identity; anything else leaves the
/// request anonymous and passes it through.
pub struct OptionalAuth {
  validate: Arc<ValidateSessionUseCase>,
}

impl OptionalAuth {
  pub fn new(validate: Arc<ValidateSessionUseCase>) -> Self {
    Self { validate }
  }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalAuth
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = OptionalAuthService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(OptionalAuthService {
      service: Rc::new(service),
      validate: self.validate.clone(),
    }))
  }
}

pub struct OptionalAuthService<S> {
  service: Rc<S>,
  validate: Arc<ValidateSessionUseCase>,
}

impl<S, B> Service<ServiceRequest> for OptionalAuthService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let validate = self.validate.clone();

    Box::pin(async move {
      if let Some(header) = raw_authorization(&req) {
        if header.starts_with("Bearer ") {
          match validate.execute(&header).await {
            Ok(user_id) => {
              req.extensions_mut().insert(AuthenticatedUser(user_id));
            }
            Err(e) => {
              tracing::debug!("Ignoring invalid optional credential: {}", e);
            }
          }
        }
      }

      service.call(req).await
    })
  }
}

/// Raw Authorization header value, if readable
fn raw_authorization(req: &ServiceRequest) -> Option<String> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_raw_authorization_present() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    assert_eq!(
      raw_authorization(&req).as_deref(),
      Some("Bearer test_token_123")
    );
  }

  #[test]
  fn test_raw_authorization_missing() {
    let req = TestRequest::default().to_srv_request();
    assert!(raw_authorization(&req).is_none());
  }

  #[test]
  fn test_identity_roundtrip() {
    let req = TestRequest::default().to_http_request();
    assert!(req.identity().is_none());

    let user_id = Uuid::new_v4();
    req.extensions_mut().insert(AuthenticatedUser(user_id));
    assert_eq!(req.identity(), Some(user_id));
  }
}
