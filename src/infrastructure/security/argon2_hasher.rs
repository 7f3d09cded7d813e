use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

// OWASP-recommended Argon2id parameters: 19 MiB memory, 2 iterations,
// single lane, 32-byte output.
const MEMORY_COST_KIB: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Argon2id implementation of the PasswordHasher port
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
      .map_err(|e| AuthError::Hash(HashError::HashingFailed(e.to_string())))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

impl Default for Argon2PasswordHasher {
  fn default() -> Self {
    Self::new().expect("Failed to create default Argon2PasswordHasher")
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    // Fresh random salt per hash, from the OS RNG
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| AuthError::Hash(HashError::HashingFailed(e.to_string())))?;

    PasswordHash::from_hash(hash.to_string())
      .map_err(|e| AuthError::Hash(HashError::HashingFailed(e.to_string())))
  }

  /// A mismatch is `Ok(false)`; only an unparseable hash or an internal
  /// argon2 failure is an error. Comparison inside argon2 is constant-time.
  async fn verify(
    &self,
    password: &str,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let parsed = Argon2PasswordHash::new(hashed_password.as_str())
      .map_err(|_| AuthError::Hash(HashError::InvalidFormat))?;

    match self.argon2.verify_password(password.as_bytes(), &parsed) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(AuthError::Hash(HashError::VerificationFailed(
        e.to_string(),
      ))),
    }
  }
}
