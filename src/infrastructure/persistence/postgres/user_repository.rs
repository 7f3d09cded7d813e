use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

/// Database row structure for the users table
#[derive(Debug, FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl UserRow {
  fn into_entity(self) -> User {
    User::from_db(
      self.id,
      self.username,
      self.email,
      self.password_hash,
      self.created_at,
    )
  }
}

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, created_at
            "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create user: {}", e);
      AuthError::from(e)
    })?;

    Ok(row.into_entity())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find user by email: {}", e);
      AuthError::from(e)
    })?;

    Ok(row.map(UserRow::into_entity))
  }

  async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
    let exists: bool =
      sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 LIMIT 1)"#)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to probe email existence: {}", e);
          AuthError::from(e)
        })?;

    Ok(exists)
  }
}
