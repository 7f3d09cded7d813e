use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;

/// Token generator producing random v4 UUIDs in string form.
///
/// 122 bits of randomness from the OS RNG; opaque to clients, unique enough
/// to key sessions on.
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

impl Default for UuidTokenGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl TokenGenerator for UuidTokenGenerator {
  async fn generate(&self) -> Result<String, AuthError> {
    Ok(Uuid::new_v4().to_string())
  }
}
