use std::sync::Arc;
use uuid::Uuid;

use super::entities::AdImage;
use super::errors::ImageError;
use super::ports::{BlobStore, ImageRepository};

/// Maps a declared content type to the stored file extension
fn extension_for(content_type: &str) -> &'static str {
  match content_type {
    "image/jpeg" => ".jpg",
    "image/png" => ".png",
    _ => ".bin",
  }
}

/// Image attachment service: stores bytes through the blob store and keeps
/// a record per attached image. Records are only created for ads that exist.
pub struct ImageService {
  repo: Arc<dyn ImageRepository>,
  blobs: Arc<dyn BlobStore>,
}

impl ImageService {
  pub fn new(repo: Arc<dyn ImageRepository>, blobs: Arc<dyn BlobStore>) -> Self {
    Self { repo, blobs }
  }

  /// Attaches image bytes to an existing ad.
  ///
  /// Verifies the ad exists, stores the bytes under a random filename, then
  /// persists the record pointing at the returned public URL.
  pub async fn add_image(
    &self,
    ad_id: Uuid,
    data: &[u8],
    content_type: &str,
  ) -> Result<AdImage, ImageError> {
    if !self.repo.ad_exists(ad_id).await? {
      return Err(ImageError::AdNotFound);
    }

    let filename = format!("{}{}", Uuid::new_v4(), extension_for(content_type));
    let image_url = self.blobs.save(&filename, data).await?;

    let image = AdImage::new(ad_id, image_url);
    self.repo.create(image).await
  }

  /// All images attached to an ad. Fails with `AdNotFound` when the ad
  /// itself is absent, rather than returning an empty list for a dangling
  /// id.
  pub async fn get_images(&self, ad_id: Uuid) -> Result<Vec<AdImage>, ImageError> {
    if !self.repo.ad_exists(ad_id).await? {
      return Err(ImageError::AdNotFound);
    }

    self.repo.find_by_ad_id(ad_id).await
  }

  pub async fn get_image_by_id(&self, id: Uuid) -> Result<AdImage, ImageError> {
    self
      .repo
      .find_by_id(id)
      .await?
      .ok_or(ImageError::ImageNotFound)
  }
}
