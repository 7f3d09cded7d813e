use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::ads::services::{AdDetails, AdListing};
use crate::domain::images::entities::AdImage;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, max = 255, message = "Name is required"))]
  pub username: String,

  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Response after successful registration. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
}

/// Request for user login. Email syntax is checked by the domain; here only
/// presence is enforced.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub token: String,
}

/// Request for creating an ad. Field limits (title/description length,
/// positive price) are enforced by the domain value objects.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdRequest {
  pub title: String,
  pub description: String,
  pub price: f64,
}

/// A bare ad, as returned from creation
#[derive(Debug, Clone, Serialize)]
pub struct AdResponse {
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub price: f64,
  pub created_at: DateTime<Utc>,
  pub author_id: Uuid,
}

/// Raw query parameters for the ad listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAdsParams {
  #[serde(default)]
  pub limit: i64,
  #[serde(default)]
  pub offset: i64,
  #[serde(default)]
  pub sort: String,
  #[serde(default)]
  pub order: String,
  #[serde(default, rename = "min")]
  pub price_min: f64,
  #[serde(default, rename = "max")]
  pub price_max: f64,
}

/// One row of the ad listing page
#[derive(Debug, Clone, Serialize)]
pub struct AdListItemResponse {
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub price: f64,
  pub author: String,
  pub author_id: Uuid,
  pub is_owner: bool,
  pub images: Vec<String>,
}

impl From<AdListing> for AdListItemResponse {
  fn from(listing: AdListing) -> Self {
    Self {
      id: listing.id,
      title: listing.title,
      description: listing.description,
      price: listing.price,
      author: listing.author,
      author_id: listing.author_id,
      is_owner: listing.is_owner,
      images: listing.images,
    }
  }
}

/// Detailed single-ad view with author, images and the viewer's ownership
#[derive(Debug, Clone, Serialize)]
pub struct AdDetailedResponse {
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub price: f64,
  pub created_at: DateTime<Utc>,
  pub author_id: Uuid,
  pub author: String,
  pub is_owner: bool,
  pub images: Vec<ImageResponse>,
}

impl From<AdDetails> for AdDetailedResponse {
  fn from(details: AdDetails) -> Self {
    Self {
      id: details.ad.id,
      title: details.ad.title,
      description: details.ad.description,
      price: details.ad.price,
      created_at: details.ad.created_at,
      author_id: details.ad.author_id,
      author: details.author,
      is_owner: details.is_owner,
      images: details.images.into_iter().map(ImageResponse::from).collect(),
    }
  }
}

/// Stored image record
#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
  pub id: Uuid,
  pub ad_id: Uuid,
  pub image_url: String,
  pub created_at: DateTime<Utc>,
}

impl From<AdImage> for ImageResponse {
  fn from(image: AdImage) -> Self {
    Self {
      id: image.id,
      ad_id: image.ad_id,
      image_url: image.image_url,
      created_at: image.created_at,
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,
  /// Human-readable message, safe to show to the caller
  pub message: String,
}
