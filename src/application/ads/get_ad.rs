use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ads::errors::AdsError;
use crate::domain::ads::services::{AdDetails, AdService};

/// Use case for fetching one ad with author, images and ownership flag
pub struct GetAdUseCase {
  ad_service: Arc<AdService>,
}

impl GetAdUseCase {
  pub fn new(ad_service: Arc<AdService>) -> Self {
    Self { ad_service }
  }

  pub async fn execute(&self, ad_id: Uuid, viewer: Option<Uuid>) -> Result<AdDetails, AdsError> {
    self.ad_service.get_by_id(ad_id, viewer).await
  }
}
