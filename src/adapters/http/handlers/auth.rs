use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
  errors::ApiError,
  middleware::RequestIdentity,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /api/v1/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    username: request.username.clone(),
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(RegisterResponse {
    id: response.user_id,
    username: response.username,
    email: response.email,
    created_at: response.created_at,
  }))
}

/// Handler for user login
///
/// POST /api/v1/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let token = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// Handler for user logout
///
/// POST /api/v1/logout
/// Headers: Authorization: Bearer <token>
/// Response: empty 200
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user_id = http_req
    .identity()
    .ok_or_else(|| ApiError::Unauthorized("unauthorized".to_string()))?;

  use_case.execute(user_id).await.map_err(|e| {
    tracing::error!("Logout failed: {}", e);
    ApiError::Internal("log out failed".to_string())
  })?;

  Ok(HttpResponse::Ok().finish())
}
