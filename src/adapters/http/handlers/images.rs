use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{
  dtos::ImageResponse,
  errors::ApiError,
  middleware::RequestIdentity,
};
use crate::application::images::{AddImageUseCase, GetImageUseCase, ListImagesUseCase};

/// Upload cap, matching the boundary contract for ad images
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Sniffs the payload's image type from its magic bytes.
///
/// Only JPEG and PNG are accepted; the declared Content-Type header is
/// ignored on purpose, the bytes decide.
fn sniff_image_type(data: &[u8]) -> Option<&'static str> {
  if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
    return Some("image/jpeg");
  }
  if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
    return Some("image/png");
  }
  None
}

/// Handler for attaching an image to an ad
///
/// POST /api/v1/ads/{id}/images (auth required, multipart)
/// The first file field is read, capped at 10 MiB and sniffed; accepted
/// bytes go through the blob store. Response: ImageResponse with status 201.
pub async fn add_image_handler(
  path: web::Path<Uuid>,
  mut payload: Multipart,
  use_case: web::Data<Arc<AddImageUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  http_req
    .identity()
    .ok_or_else(|| ApiError::Unauthorized("unauthorized".to_string()))?;

  let ad_id = path.into_inner();

  while let Some(field) = payload.next().await {
    let mut field =
      field.map_err(|e| ApiError::Validation(format!("cannot read multipart field: {}", e)))?;

    let mut data: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
      let chunk =
        chunk.map_err(|e| ApiError::Validation(format!("cannot read file: {}", e)))?;
      if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation("file exceeds the 10 MB limit".to_string()));
      }
      data.extend_from_slice(&chunk);
    }

    let content_type = match sniff_image_type(&data) {
      Some(ct) => ct,
      None => {
        tracing::debug!(
          "Rejected upload: first bytes do not match a supported image format"
        );
        return Err(ApiError::UnsupportedMediaType(
          "unsupported image type".to_string(),
        ));
      }
    };

    let image = use_case.execute(ad_id, &data, content_type).await?;

    return Ok(HttpResponse::Created().json(ImageResponse::from(image)));
  }

  Err(ApiError::Validation("file field is required".to_string()))
}

/// Handler for listing an ad's images
///
/// GET /api/v1/ads/{id}/images
pub async fn list_images_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ListImagesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let images = use_case.execute(path.into_inner()).await?;

  let response: Vec<ImageResponse> = images.into_iter().map(ImageResponse::from).collect();

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for fetching a single image record
///
/// GET /api/v1/ads/images/{id}
pub async fn get_image_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetImageUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let image = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ImageResponse::from(image)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sniff_jpeg() {
    assert_eq!(
      sniff_image_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
      Some("image/jpeg")
    );
  }

  #[test]
  fn test_sniff_png() {
    assert_eq!(
      sniff_image_type(b"\x89PNG\r\n\x1a\nrest-of-file"),
      Some("image/png")
    );
  }

  #[test]
  fn test_sniff_rejects_other_payloads() {
    assert_eq!(sniff_image_type(b"GIF89a"), None);
    assert_eq!(sniff_image_type(b"%PDF-1.7"), None);
    assert_eq!(sniff_image_type(b""), None);
    // Declared type would have said image/png, bytes say otherwise
    assert_eq!(sniff_image_type(b"<svg></svg>"), None);
  }
}
