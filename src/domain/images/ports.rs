use async_trait::async_trait;
use uuid::Uuid;

use super::entities::AdImage;
use super::errors::ImageError;

/// Repository trait for ad image records
#[async_trait]
pub trait ImageRepository: Send + Sync {
  /// Persists a new image record and returns the stored row
  async fn create(&self, image: AdImage) -> Result<AdImage, ImageError>;

  /// All images attached to an ad, oldest first
  async fn find_by_ad_id(&self, ad_id: Uuid) -> Result<Vec<AdImage>, ImageError>;

  /// Point lookup by image id
  async fn find_by_id(&self, id: Uuid) -> Result<Option<AdImage>, ImageError>;

  /// Existence probe for the referenced ad
  async fn ad_exists(&self, ad_id: Uuid) -> Result<bool, ImageError>;
}

/// Blob storage: accepts raw bytes under a generated filename and returns a
/// stable public URL for them
#[async_trait]
pub trait BlobStore: Send + Sync {
  async fn save(&self, filename: &str, data: &[u8]) -> Result<String, ImageError>;
}
