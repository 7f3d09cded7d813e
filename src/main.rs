use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adboard::{
  adapters::http::{configure_ad_routes, configure_auth_routes, configure_image_routes},
  application::ads::{CreateAdUseCase, DeleteAdUseCase, GetAdUseCase, ListAdsUseCase},
  application::auth::{
    LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase, ValidateSessionUseCase,
  },
  application::images::{AddImageUseCase, GetImageUseCase, ListImagesUseCase},
  domain::ads::services::AdService,
  domain::auth::services::{AuthService, AuthServiceConfig, RegistrationService},
  domain::images::services::ImageService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresAdRepository, PostgresImageRepository, PostgresSessionRepository,
      PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, UuidTokenGenerator},
    storage::LocalBlobStore,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "adboard=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting adboard");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let connect = PgPoolOptions::new()
    .max_connections(config.database.max_connections)
    .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
    .connect(&config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    connect,
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {}s. Is PostgreSQL running at {}?",
      config.database.connect_timeout_seconds,
      config.database.url
    );
    std::io::Error::new(std::io::ErrorKind::TimedOut, "database connection timed out")
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let ad_repo = Arc::new(PostgresAdRepository::new(db_pool.clone()));
  let image_repo = Arc::new(PostgresImageRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let token_generator = Arc::new(UuidTokenGenerator::new());

  // Initialize blob storage for uploaded images
  let blob_store = Arc::new(LocalBlobStore::new(
    config.uploads.dir.clone(),
    config.uploads.public_base.clone(),
  ));

  // Initialize domain services
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
  };

  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo.clone(),
    password_hasher.clone(),
    token_generator.clone(),
    auth_config,
  ));

  let registration_service = Arc::new(RegistrationService::new(
    user_repo.clone(),
    password_hasher.clone(),
  ));

  let ad_service = Arc::new(AdService::new(ad_repo.clone(), image_repo.clone()));

  let image_service = Arc::new(ImageService::new(image_repo.clone(), blob_store.clone()));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(registration_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let validate_session = Arc::new(ValidateSessionUseCase::new(auth_service.clone()));

  let create_ad_use_case = Arc::new(CreateAdUseCase::new(ad_service.clone()));
  let list_ads_use_case = Arc::new(ListAdsUseCase::new(ad_service.clone()));
  let get_ad_use_case = Arc::new(GetAdUseCase::new(ad_service.clone()));
  let delete_ad_use_case = Arc::new(DeleteAdUseCase::new(ad_service.clone()));

  let add_image_use_case = Arc::new(AddImageUseCase::new(image_service.clone()));
  let list_images_use_case = Arc::new(ListImagesUseCase::new(image_service.clone()));
  let get_image_use_case = Arc::new(GetImageUseCase::new(image_service.clone()));

  let uploads_dir = config.uploads.dir.clone();
  let uploads_public = config.uploads.public_base.clone();
  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Request logging
      .wrap(Logger::default())
      // API routes
      .service(
        web::scope("/api/v1")
          .configure(|cfg| {
            configure_auth_routes(
              cfg,
              register_use_case.clone(),
              login_use_case.clone(),
              logout_use_case.clone(),
              validate_session.clone(),
            )
          })
          .configure(|cfg| {
            configure_ad_routes(
              cfg,
              create_ad_use_case.clone(),
              list_ads_use_case.clone(),
              get_ad_use_case.clone(),
              delete_ad_use_case.clone(),
              validate_session.clone(),
            )
          })
          .configure(|cfg| {
            configure_image_routes(
              cfg,
              add_image_use_case.clone(),
              list_images_use_case.clone(),
              get_image_use_case.clone(),
              validate_session.clone(),
            )
          }),
      )
      // Stored images are served as static files
      .service(fs::Files::new(uploads_public.as_str(), uploads_dir.clone()))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
