use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::SessionRepository;

/// Database row structure for the sessions table
#[derive(Debug, FromRow)]
struct SessionRow {
  token: String,
  user_id: Uuid,
  created_at: DateTime<Utc>,
  expires_at: DateTime<Utc>,
}

impl SessionRow {
  fn into_entity(self) -> Session {
    Session::from_db(self.token, self.user_id, self.created_at, self.expires_at)
  }
}

/// PostgreSQL implementation of the SessionRepository trait.
///
/// The sessions table carries UNIQUE(user_id): a user holds at most one
/// session row, and the single-row INSERT/UPDATE/DELETE semantics of the
/// database are what make the check-then-act patterns in the service safe
/// under concurrent requests.
pub struct PostgresSessionRepository {
  pool: PgPool,
}

impl PostgresSessionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, user_id, created_at, expires_at
            "#,
    )
    .bind(&session.token)
    .bind(session.user_id)
    .bind(session.created_at)
    .bind(session.expires_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create session: {}", e);
      AuthError::from(e)
    })?;

    Ok(row.into_entity())
  }

  /// The query filters to non-expired rows, so an expired session and a
  /// missing one look the same to the caller.
  async fn find_by_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > now()
            "#,
    )
    .bind(token)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find session by token: {}", e);
      AuthError::from(e)
    })?;

    Ok(row.map(SessionRow::into_entity))
  }

  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Session>, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE user_id = $1
            "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find session by user_id: {}", e);
      AuthError::from(e)
    })?;

    Ok(row.map(SessionRow::into_entity))
  }

  async fn exists_for_user(&self, user_id: Uuid) -> Result<bool, AuthError> {
    let exists: bool =
      sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM sessions WHERE user_id = $1 LIMIT 1)"#)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to probe session existence: {}", e);
          AuthError::from(e)
        })?;

    Ok(exists)
  }

  /// Overwrites the user's single session row in place, keyed by user_id
  async fn rotate(&self, session: &Session) -> Result<Session, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            UPDATE sessions
            SET token = $1, created_at = $2, expires_at = $3
            WHERE user_id = $4
            RETURNING token, user_id, created_at, expires_at
            "#,
    )
    .bind(&session.token)
    .bind(session.created_at)
    .bind(session.expires_at)
    .bind(session.user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to rotate session: {}", e);
      AuthError::from(e)
    })?;

    match row {
      Some(row) => Ok(row.into_entity()),
      None => {
        tracing::warn!("No session row to rotate for user {}", session.user_id);
        Err(AuthError::Repository(RepositoryError::NotFound))
      }
    }
  }

  async fn delete_by_token(&self, token: &str) -> Result<(), AuthError> {
    sqlx::query(r#"DELETE FROM sessions WHERE token = $1"#)
      .bind(token)
      .execute(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to delete session: {}", e);
        AuthError::from(e)
      })?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  async fn create_test_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    let email = format!("test_{}@example.com", user_id);
    sqlx::query(
      r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, 'tester', $2, 'hash', now())
            "#,
    )
    .bind(user_id)
    .bind(&email)
    .execute(pool)
    .await
    .expect("Failed to create test user");
    user_id
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_create_and_find_session() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let session = Session::with_duration(user_id, "test_token".to_string(), Duration::hours(24));

    let created = repo.create(session).await.unwrap();
    assert_eq!(created.user_id, user_id);

    let found = repo.find_by_token("test_token").await.unwrap();
    assert_eq!(found.unwrap().user_id, user_id);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_find_by_token_filters_expired_rows() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let mut session = Session::with_duration(user_id, "expired".to_string(), Duration::hours(1));
    session.expires_at = Utc::now() - Duration::hours(1);
    repo.create(session).await.unwrap();

    // Expired and missing are indistinguishable through this lookup
    assert!(repo.find_by_token("expired").await.unwrap().is_none());
    // But the row is still there for the user
    assert!(repo.find_by_user_id(user_id).await.unwrap().is_some());
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_unique_constraint_rejects_second_session() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let first = Session::with_duration(user_id, "one".to_string(), Duration::hours(24));
    repo.create(first).await.unwrap();

    let second = Session::with_duration(user_id, "two".to_string(), Duration::hours(24));
    let err = repo.create(second).await.unwrap_err();
    assert!(matches!(
      err,
      AuthError::Repository(RepositoryError::DuplicateKey(_))
    ));
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_rotate_overwrites_in_place() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let session = Session::with_duration(user_id, "before".to_string(), Duration::hours(24));
    let mut created = repo.create(session).await.unwrap();

    created.rotate("after".to_string(), Duration::hours(24));
    repo.rotate(&created).await.unwrap();

    assert!(repo.find_by_token("before").await.unwrap().is_none());
    let stored = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(stored.token, "after");
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_delete_by_token() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresSessionRepository::new(pool.clone());

    let user_id = create_test_user(&pool).await;
    let session = Session::with_duration(user_id, "gone".to_string(), Duration::hours(24));
    repo.create(session).await.unwrap();

    repo.delete_by_token("gone").await.unwrap();
    assert!(!repo.exists_for_user(user_id).await.unwrap());
  }
}
