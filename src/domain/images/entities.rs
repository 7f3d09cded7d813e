use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image attached to an ad. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdImage {
  /// Unique identifier for the image record
  pub id: Uuid,
  /// Reference to the ad this image belongs to
  pub ad_id: Uuid,
  /// Public URL under which the stored bytes are retrievable
  pub image_url: String,
  /// Timestamp when the image was attached
  pub created_at: DateTime<Utc>,
}

impl AdImage {
  pub fn new(ad_id: Uuid, image_url: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      ad_id,
      image_url,
      created_at: Utc::now(),
    }
  }

  /// Creates an image record from database fields (for reconstruction)
  pub fn from_db(id: Uuid, ad_id: Uuid, image_url: String, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      ad_id,
      image_url,
      created_at,
    }
  }
}
