use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Ad;
use super::errors::AdsError;
use super::value_objects::AdListQuery;
use crate::domain::images::entities::AdImage;

/// Repository trait for ad persistence operations
#[async_trait]
pub trait AdRepository: Send + Sync {
  /// Persists a new ad and returns the stored record
  async fn create(&self, ad: Ad) -> Result<Ad, AdsError>;

  /// Point lookup by ad id
  async fn find_by_id(&self, ad_id: Uuid) -> Result<Option<Ad>, AdsError>;

  /// Returns a page of ads for a normalized query. An empty result set is
  /// reported as `AdsError::NotFound`, not as an empty vector.
  async fn list(&self, query: &AdListQuery) -> Result<Vec<Ad>, AdsError>;

  /// Deletes an ad scoped by both id and author (filtered delete) and
  /// returns the affected-row count
  async fn delete_for_author(&self, ad_id: Uuid, author_id: Uuid) -> Result<u64, AdsError>;

  /// Looks up the display name of an ad's author
  async fn find_author_name(&self, author_id: Uuid) -> Result<Option<String>, AdsError>;
}

/// Narrow image lookup used when assembling ad responses
#[async_trait]
pub trait ImageLookup: Send + Sync {
  async fn find_by_ad_id(&self, ad_id: Uuid) -> Result<Vec<AdImage>, AdsError>;
}
