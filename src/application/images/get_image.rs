use std::sync::Arc;
use uuid::Uuid;

use crate::domain::images::entities::AdImage;
use crate::domain::images::errors::ImageError;
use crate::domain::images::services::ImageService;

/// Use case for fetching a single image record
pub struct GetImageUseCase {
  image_service: Arc<ImageService>,
}

impl GetImageUseCase {
  pub fn new(image_service: Arc<ImageService>) -> Self {
    Self { image_service }
  }

  pub async fn execute(&self, image_id: Uuid) -> Result<AdImage, ImageError> {
    self.image_service.get_image_by_id(image_id).await
  }
}
