use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Display name shown as the author of ads
  pub username: String,
  /// User's email address (unique, stored exactly as given)
  pub email: String,
  /// Hashed password using Argon2
  pub password_hash: String,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with a fresh id and creation timestamp
  pub fn new(username: String, email: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      password_hash,
      created_at: Utc::now(),
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      username,
      email,
      password_hash,
      created_at,
    }
  }
}

/// Session entity: the single bearer credential a user holds at a time.
///
/// There is at most one session row per user. Instead of stacking new
/// sessions, an expired one is rotated in place (token and timestamps
/// overwritten, user association preserved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  /// Opaque bearer token identifying this session
  pub token: String,
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// Timestamp when the session (or its current token) was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session for a user with the given time to live
  pub fn with_duration(user_id: Uuid, token: String, ttl: Duration) -> Self {
    let now = Utc::now();
    Self {
      token,
      user_id,
      created_at: now,
      expires_at: now + ttl,
    }
  }

  /// Creates a session from database fields (for reconstruction)
  pub fn from_db(
    token: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
  ) -> Self {
    Self {
      token,
      user_id,
      created_at,
      expires_at,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }

  /// Replaces the token and timestamps in place, keeping the user association
  pub fn rotate(&mut self, new_token: String, ttl: Duration) {
    self.token = new_token;
    self.created_at = Utc::now();
    self.expires_at = self.created_at + ttl;
  }
}
