use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{AdDescription, AdTitle, Price};

/// Ad entity: a classified listing owned by its author.
///
/// `author_id` is the sole authorization key for mutation; only the author
/// may delete the ad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
  /// Unique identifier for the ad
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub price: f64,
  /// Timestamp when the ad was created
  pub created_at: DateTime<Utc>,
  /// Reference to the authoring user
  pub author_id: Uuid,
}

impl Ad {
  /// Creates a new ad with a fresh id and creation timestamp
  pub fn new(title: AdTitle, description: AdDescription, price: Price, author_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: title.into_inner(),
      description: description.into_inner(),
      price: price.value(),
      created_at: Utc::now(),
      author_id,
    }
  }

  /// Creates an ad from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    title: String,
    description: String,
    price: f64,
    created_at: DateTime<Utc>,
    author_id: Uuid,
  ) -> Self {
    Self {
      id,
      title,
      description,
      price,
      created_at,
      author_id,
    }
  }
}
