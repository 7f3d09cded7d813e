use std::sync::Arc;
use uuid::Uuid;

use crate::domain::images::entities::AdImage;
use crate::domain::images::errors::ImageError;
use crate::domain::images::services::ImageService;

/// Use case for attaching an uploaded image to an ad
pub struct AddImageUseCase {
  image_service: Arc<ImageService>,
}

impl AddImageUseCase {
  pub fn new(image_service: Arc<ImageService>) -> Self {
    Self { image_service }
  }

  /// The bytes have already passed the upload sniffing at the HTTP
  /// boundary; `content_type` is the sniffed type, which decides the
  /// stored file extension.
  pub async fn execute(
    &self,
    ad_id: Uuid,
    data: &[u8],
    content_type: &str,
  ) -> Result<AdImage, ImageError> {
    self.image_service.add_image(ad_id, data, content_type).await
  }
}
