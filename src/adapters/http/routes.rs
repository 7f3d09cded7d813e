use actix_web::{guard, web};
use std::sync::Arc;

use crate::application::ads::{CreateAdUseCase, DeleteAdUseCase, GetAdUseCase, ListAdsUseCase};
use crate::application::auth::{
  LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase, ValidateSessionUseCase,
};
use crate::application::images::{AddImageUseCase, GetImageUseCase, ListImagesUseCase};

use super::handlers::ads::{
  create_ad_handler, delete_ad_handler, get_ad_handler, list_ads_handler,
};
use super::handlers::auth::{login_handler, logout_handler, register_handler};
use super::handlers::images::{add_image_handler, get_image_handler, list_images_handler};
use super::middleware::{OptionalAuth, RequireAuth};

/// Configure authentication routes
///
/// # Routes
/// - POST /register - Register a new user account (public)
/// - POST /login - Authenticate and return the session token (public)
/// - POST /logout - Delete the caller's session (auth required)
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  logout_use_case: Arc<LogoutUserUseCase>,
  validate_session: Arc<ValidateSessionUseCase>,
) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(logout_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .service(
      web::resource("/logout")
        .wrap(RequireAuth::new(validate_session))
        .route(web::post().to(logout_handler)),
    );
}

/// Configure ad routes
///
/// # Routes
/// - POST /ads - Create an ad (auth required)
/// - GET /ads - List ads (auth optional, enables is_owner flags)
/// - GET /ads/{id} - Fetch one ad (auth optional)
/// - DELETE /ads/{id} - Delete an ad as its owner (auth required)
pub fn configure_ad_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateAdUseCase>,
  list_use_case: Arc<ListAdsUseCase>,
  get_use_case: Arc<GetAdUseCase>,
  delete_use_case: Arc<DeleteAdUseCase>,
  validate_session: Arc<ValidateSessionUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(delete_use_case))
    .service(
      web::resource("/ads")
        .guard(guard::Post())
        .wrap(RequireAuth::new(validate_session.clone()))
        .route(web::post().to(create_ad_handler)),
    )
    .service(
      web::resource("/ads")
        .guard(guard::Get())
        .wrap(OptionalAuth::new(validate_session.clone()))
        .route(web::get().to(list_ads_handler)),
    )
    .service(
      web::resource("/ads/{id}")
        .guard(guard::Get())
        .wrap(OptionalAuth::new(validate_session.clone()))
        .route(web::get().to(get_ad_handler)),
    )
    .service(
      web::resource("/ads/{id}")
        .guard(guard::Delete())
        .wrap(RequireAuth::new(validate_session))
        .route(web::delete().to(delete_ad_handler)),
    );
}

/// Configure ad image routes
///
/// Registered after `/ads/images/{id}` would otherwise be shadowed: the
/// static `images` segment must win over the `{id}` placeholder.
///
/// # Routes
/// - GET /ads/images/{id} - Fetch one image record (public)
/// - POST /ads/{id}/images - Attach an image (auth required, multipart)
/// - GET /ads/{id}/images - List an ad's images (public)
pub fn configure_image_routes(
  cfg: &mut web::ServiceConfig,
  add_use_case: Arc<AddImageUseCase>,
  list_use_case: Arc<ListImagesUseCase>,
  get_use_case: Arc<GetImageUseCase>,
  validate_session: Arc<ValidateSessionUseCase>,
) {
  cfg
    .app_data(web::Data::new(add_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .route("/ads/images/{id}", web::get().to(get_image_handler))
    .service(
      web::resource("/ads/{id}/images")
        .guard(guard::Post())
        .wrap(RequireAuth::new(validate_session))
        .route(web::post().to(add_image_handler)),
    )
    .route("/ads/{id}/images", web::get().to(list_images_handler));
}
