use std::sync::Arc;
use uuid::Uuid;

use crate::domain::images::entities::AdImage;
use crate::domain::images::errors::ImageError;
use crate::domain::images::services::ImageService;

/// Use case for listing the images attached to an ad
pub struct ListImagesUseCase {
  image_service: Arc<ImageService>,
}

impl ListImagesUseCase {
  pub fn new(image_service: Arc<ImageService>) -> Self {
    Self { image_service }
  }

  pub async fn execute(&self, ad_id: Uuid) -> Result<Vec<AdImage>, ImageError> {
    self.image_service.get_images(ad_id).await
  }
}
