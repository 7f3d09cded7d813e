use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{
  dtos::{AdDetailedResponse, AdListItemResponse, AdResponse, CreateAdRequest, ListAdsParams},
  errors::ApiError,
  middleware::RequestIdentity,
};
use crate::application::ads::{
  CreateAdCommand, CreateAdUseCase, DeleteAdUseCase, GetAdUseCase, ListAdsCommand, ListAdsUseCase,
};

/// Handler for creating an ad
///
/// POST /api/v1/ads (auth required)
/// Body: CreateAdRequest (JSON)
/// Response: AdResponse (JSON) with status 201
pub async fn create_ad_handler(
  request: web::Json<CreateAdRequest>,
  use_case: web::Data<Arc<CreateAdUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let author_id = http_req
    .identity()
    .ok_or_else(|| ApiError::Unauthorized("unauthorized".to_string()))?;

  let command = CreateAdCommand {
    title: request.title.clone(),
    description: request.description.clone(),
    price: request.price,
  };

  let ad = use_case.execute(command, author_id).await?;

  Ok(HttpResponse::Created().json(AdResponse {
    id: ad.id,
    title: ad.title,
    description: ad.description,
    price: ad.price,
    created_at: ad.created_at,
    author_id: ad.author_id,
  }))
}

/// Handler for listing ads
///
/// GET /api/v1/ads?limit=&offset=&sort=&order=&min=&max= (auth optional)
/// Response: array of AdListItemResponse; an empty page is 404
pub async fn list_ads_handler(
  params: web::Query<ListAdsParams>,
  use_case: web::Data<Arc<ListAdsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let viewer = http_req.identity();

  let command = ListAdsCommand {
    limit: params.limit,
    offset: params.offset,
    sort_by: params.sort.clone(),
    order: params.order.clone(),
    price_min: params.price_min,
    price_max: params.price_max,
  };

  let listings = use_case.execute(command, viewer).await?;

  let response: Vec<AdListItemResponse> = listings
    .into_iter()
    .map(AdListItemResponse::from)
    .collect();

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for fetching one ad
///
/// GET /api/v1/ads/{id} (auth optional, enables is_owner)
/// Response: AdDetailedResponse
pub async fn get_ad_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetAdUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let ad_id = path.into_inner();
  let viewer = http_req.identity();

  let details = use_case.execute(ad_id, viewer).await?;

  Ok(HttpResponse::Ok().json(AdDetailedResponse::from(details)))
}

/// Handler for deleting an ad as its owner
///
/// DELETE /api/v1/ads/{id} (auth required)
/// Response: empty 200; 403 for non-owners, 404 for unknown ads
pub async fn delete_ad_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteAdUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let actor = http_req
    .identity()
    .ok_or_else(|| ApiError::Unauthorized("unauthorized".to_string()))?;

  use_case.execute(path.into_inner(), actor).await?;

  Ok(HttpResponse::Ok().finish())
}
