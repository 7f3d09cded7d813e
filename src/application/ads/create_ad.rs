use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ads::entities::Ad;
use crate::domain::ads::errors::AdsError;
use crate::domain::ads::services::{AdService, NewAd};
use crate::domain::ads::value_objects::{AdDescription, AdTitle, Price};

/// Command for creating an ad. The author comes from the validated session,
/// not from the request body.
#[derive(Debug, Clone)]
pub struct CreateAdCommand {
  pub title: String,
  pub description: String,
  pub price: f64,
}

/// Use case for creating an ad
pub struct CreateAdUseCase {
  ad_service: Arc<AdService>,
}

impl CreateAdUseCase {
  pub fn new(ad_service: Arc<AdService>) -> Self {
    Self { ad_service }
  }

  /// # Errors
  /// Returns `AdsError::TitleTooLong`, `DescriptionTooLong` or
  /// `InvalidPrice` for out-of-bounds fields.
  pub async fn execute(&self, command: CreateAdCommand, author_id: Uuid) -> Result<Ad, AdsError> {
    let new_ad = NewAd {
      title: AdTitle::new(command.title)?,
      description: AdDescription::new(command.description)?,
      price: Price::new(command.price)?,
      author_id,
    };

    self.ad_service.create(new_ad).await
  }
}
