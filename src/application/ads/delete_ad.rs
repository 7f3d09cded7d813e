use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ads::errors::AdsError;
use crate::domain::ads::services::AdService;

/// Use case for deleting an ad as its owner
pub struct DeleteAdUseCase {
  ad_service: Arc<AdService>,
}

impl DeleteAdUseCase {
  pub fn new(ad_service: Arc<AdService>) -> Self {
    Self { ad_service }
  }

  /// # Errors
  /// `AdsError::NotFound` when the ad is absent, `AdsError::Forbidden` when
  /// the actor is not the author.
  pub async fn execute(&self, ad_id: Uuid, actor: Uuid) -> Result<(), AdsError> {
    self.ad_service.delete(ad_id, actor).await
  }
}
