use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::ads::errors::AdsError;
use crate::domain::ads::ports::ImageLookup;
use crate::domain::images::entities::AdImage;
use crate::domain::images::errors::ImageError;
use crate::domain::images::ports::ImageRepository;

/// Database row structure for the ad_images table
#[derive(Debug, FromRow)]
struct AdImageRow {
  id: Uuid,
  ad_id: Uuid,
  image_url: String,
  created_at: DateTime<Utc>,
}

impl AdImageRow {
  fn into_entity(self) -> AdImage {
    AdImage::from_db(self.id, self.ad_id, self.image_url, self.created_at)
  }
}

/// PostgreSQL implementation of the image record store. Also provides the
/// narrow `ImageLookup` view the ad service uses when assembling responses.
pub struct PostgresImageRepository {
  pool: PgPool,
}

impl PostgresImageRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_for_ad(&self, ad_id: Uuid) -> Result<Vec<AdImage>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AdImageRow>(
      r#"
            SELECT id, ad_id, image_url, created_at
            FROM ad_images
            WHERE ad_id = $1
            ORDER BY created_at ASC
            "#,
    )
    .bind(ad_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(AdImageRow::into_entity).collect())
  }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
  async fn create(&self, image: AdImage) -> Result<AdImage, ImageError> {
    let row = sqlx::query_as::<_, AdImageRow>(
      r#"
            INSERT INTO ad_images (id, ad_id, image_url, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ad_id, image_url, created_at
            "#,
    )
    .bind(image.id)
    .bind(image.ad_id)
    .bind(&image.image_url)
    .bind(image.created_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create ad image: {}", e);
      ImageError::from(e)
    })?;

    Ok(row.into_entity())
  }

  async fn find_by_ad_id(&self, ad_id: Uuid) -> Result<Vec<AdImage>, ImageError> {
    self.fetch_for_ad(ad_id).await.map_err(|e| {
      tracing::error!("Failed to list images for ad: {}", e);
      ImageError::from(e)
    })
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<AdImage>, ImageError> {
    let row = sqlx::query_as::<_, AdImageRow>(
      r#"
            SELECT id, ad_id, image_url, created_at
            FROM ad_images
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find image by id: {}", e);
      ImageError::from(e)
    })?;

    Ok(row.map(AdImageRow::into_entity))
  }

  async fn ad_exists(&self, ad_id: Uuid) -> Result<bool, ImageError> {
    let exists: bool =
      sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM ads WHERE id = $1 LIMIT 1)"#)
        .bind(ad_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to probe ad existence: {}", e);
          ImageError::from(e)
        })?;

    Ok(exists)
  }
}

#[async_trait]
impl ImageLookup for PostgresImageRepository {
  async fn find_by_ad_id(&self, ad_id: Uuid) -> Result<Vec<AdImage>, AdsError> {
    self.fetch_for_ad(ad_id).await.map_err(|e| {
      tracing::error!("Failed to list images for ad: {}", e);
      AdsError::from(e)
    })
  }
}
