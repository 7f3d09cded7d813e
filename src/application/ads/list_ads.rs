use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ads::errors::AdsError;
use crate::domain::ads::services::{AdListing, AdService};
use crate::domain::ads::value_objects::AdListQuery;

/// Raw listing parameters as they arrive from the query string
#[derive(Debug, Clone, Default)]
pub struct ListAdsCommand {
  pub limit: i64,
  pub offset: i64,
  pub sort_by: String,
  pub order: String,
  pub price_min: f64,
  pub price_max: f64,
}

/// Use case for listing ads
pub struct ListAdsUseCase {
  ad_service: Arc<AdService>,
}

impl ListAdsUseCase {
  pub fn new(ad_service: Arc<AdService>) -> Self {
    Self { ad_service }
  }

  /// Normalizes the raw query (defaults, allow-lists) and fetches the page.
  /// Zero matching rows surface as `AdsError::NotFound`.
  pub async fn execute(
    &self,
    command: ListAdsCommand,
    viewer: Option<Uuid>,
  ) -> Result<Vec<AdListing>, AdsError> {
    let query = AdListQuery::new(
      command.limit,
      command.offset,
      &command.sort_by,
      &command.order,
      command.price_min,
      command.price_max,
    )?;

    self.ad_service.list(viewer, query).await
  }
}
