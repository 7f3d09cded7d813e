use std::sync::Arc;
use uuid::Uuid;

use super::entities::Ad;
use super::errors::AdsError;
use super::policy::AdOwnershipPolicy;
use super::ports::{AdRepository, ImageLookup};
use super::value_objects::{AdDescription, AdListQuery, AdTitle, Price};
use crate::domain::images::entities::AdImage;

/// Validated input for creating an ad. The author id is resolved upstream
/// from the caller's session.
pub struct NewAd {
  pub title: AdTitle,
  pub description: AdDescription,
  pub price: Price,
  pub author_id: Uuid,
}

/// Detailed view of a single ad, aggregated for a particular viewer
#[derive(Debug, Clone)]
pub struct AdDetails {
  pub ad: Ad,
  pub author: String,
  pub images: Vec<AdImage>,
  pub is_owner: bool,
}

/// One row of an ad listing page
#[derive(Debug, Clone)]
pub struct AdListing {
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub price: f64,
  pub author: String,
  pub author_id: Uuid,
  pub is_owner: bool,
  pub images: Vec<String>,
}

/// Ad lifecycle service: create, read (single and paged), delete.
///
/// Delete authorization goes through `AdOwnershipPolicy` and is backed by a
/// filtered delete in storage, so a concurrent ownership change between the
/// check and the delete still cannot remove another owner's ad.
pub struct AdService {
  ads: Arc<dyn AdRepository>,
  images: Arc<dyn ImageLookup>,
}

impl AdService {
  pub fn new(ads: Arc<dyn AdRepository>, images: Arc<dyn ImageLookup>) -> Self {
    Self { ads, images }
  }

  /// Assigns identity and creation time, then persists the ad
  pub async fn create(&self, new_ad: NewAd) -> Result<Ad, AdsError> {
    let ad = Ad::new(new_ad.title, new_ad.description, new_ad.price, new_ad.author_id);
    self.ads.create(ad).await
  }

  /// Fetches one ad together with its author name and images.
  ///
  /// Any sub-fetch failure aborts the whole operation; there are no partial
  /// results. An anonymous viewer never owns the ad.
  pub async fn get_by_id(&self, ad_id: Uuid, viewer: Option<Uuid>) -> Result<AdDetails, AdsError> {
    let ad = self
      .ads
      .find_by_id(ad_id)
      .await?
      .ok_or(AdsError::NotFound)?;

    let author = self
      .ads
      .find_author_name(ad.author_id)
      .await?
      .ok_or(AdsError::AuthorNotFound)?;

    let images = self.images.find_by_ad_id(ad.id).await?;

    let is_owner = AdOwnershipPolicy::allows(viewer, &ad);

    Ok(AdDetails {
      ad,
      author,
      images,
      is_owner,
    })
  }

  /// Deletes an ad on behalf of `actor`.
  ///
  /// Not-found and forbidden are decided against the fetched ad; the delete
  /// itself is additionally scoped by author, and zero affected rows after
  /// that filtered delete reads as the ad having disappeared.
  pub async fn delete(&self, ad_id: Uuid, actor: Uuid) -> Result<(), AdsError> {
    let ad = self
      .ads
      .find_by_id(ad_id)
      .await?
      .ok_or(AdsError::NotFound)?;

    if !AdOwnershipPolicy::allows(Some(actor), &ad) {
      return Err(AdsError::Forbidden);
    }

    let affected = self.ads.delete_for_author(ad_id, actor).await?;
    if affected == 0 {
      return Err(AdsError::NotFound);
    }

    Ok(())
  }

  /// Returns a page of ads with author names and image URLs resolved per
  /// row, preserving the repository's ordering. Zero matching rows surface
  /// as `NotFound` from the repository.
  pub async fn list(
    &self,
    viewer: Option<Uuid>,
    query: AdListQuery,
  ) -> Result<Vec<AdListing>, AdsError> {
    let ads = self.ads.list(&query).await?;

    let mut result = Vec::with_capacity(ads.len());
    for ad in ads {
      let author = self
        .ads
        .find_author_name(ad.author_id)
        .await?
        .ok_or(AdsError::AuthorNotFound)?;

      let images = self.images.find_by_ad_id(ad.id).await?;
      let image_urls = images.into_iter().map(|img| img.image_url).collect();

      let is_owner = AdOwnershipPolicy::allows(viewer, &ad);

      result.push(AdListing {
        id: ad.id,
        title: ad.title,
        description: ad.description,
        price: ad.price,
        author,
        author_id: ad.author_id,
        is_owner,
        images: image_urls,
      });
    }

    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ads::value_objects::{SortField, SortOrder};
  use std::collections::HashMap;
  use std::sync::Mutex;

  #[derive(Default)]
  struct InMemoryAdRepo {
    ads: Mutex<Vec<Ad>>,
    authors: Mutex<HashMap<Uuid, String>>,
  }

  impl InMemoryAdRepo {
    fn with_author(self, id: Uuid, name: &str) -> Self {
      self.authors.lock().unwrap().insert(id, name.to_string());
      self
    }
  }

  #[async_trait::async_trait]
  impl AdRepository for InMemoryAdRepo {
    async fn create(&self, ad: Ad) -> Result<Ad, AdsError> {
      self.ads.lock().unwrap().push(ad.clone());
      Ok(ad)
    }

    async fn find_by_id(&self, ad_id: Uuid) -> Result<Option<Ad>, AdsError> {
      Ok(self.ads.lock().unwrap().iter().find(|a| a.id == ad_id).cloned())
    }

    async fn list(&self, query: &AdListQuery) -> Result<Vec<Ad>, AdsError> {
      let mut ads: Vec<Ad> = self
        .ads
        .lock()
        .unwrap()
        .iter()
        .filter(|a| query.price_min.map(|min| a.price >= min).unwrap_or(true))
        .filter(|a| query.price_max.map(|max| a.price <= max).unwrap_or(true))
        .cloned()
        .collect();

      ads.sort_by(|a, b| {
        let ordering = match query.sort_by {
          SortField::CreatedAt => a.created_at.cmp(&b.created_at),
          SortField::Price => a.price.partial_cmp(&b.price).unwrap(),
        };
        match query.order {
          SortOrder::Asc => ordering,
          SortOrder::Desc => ordering.reverse(),
        }
      });

      let page: Vec<Ad> = ads
        .into_iter()
        .skip(query.offset as usize)
        .take(query.limit as usize)
        .collect();

      if page.is_empty() {
        return Err(AdsError::NotFound);
      }
      Ok(page)
    }

    async fn delete_for_author(&self, ad_id: Uuid, author_id: Uuid) -> Result<u64, AdsError> {
      let mut ads = self.ads.lock().unwrap();
      let before = ads.len();
      ads.retain(|a| !(a.id == ad_id && a.author_id == author_id));
      Ok((before - ads.len()) as u64)
    }

    async fn find_author_name(&self, author_id: Uuid) -> Result<Option<String>, AdsError> {
      Ok(self.authors.lock().unwrap().get(&author_id).cloned())
    }
  }

  #[derive(Default)]
  struct InMemoryImageLookup {
    images: Mutex<Vec<AdImage>>,
  }

  #[async_trait::async_trait]
  impl ImageLookup for InMemoryImageLookup {
    async fn find_by_ad_id(&self, ad_id: Uuid) -> Result<Vec<AdImage>, AdsError> {
      Ok(
        self
          .images
          .lock()
          .unwrap()
          .iter()
          .filter(|img| img.ad_id == ad_id)
          .cloned()
          .collect(),
      )
    }
  }

  fn new_bike(author_id: Uuid) -> NewAd {
    NewAd {
      title: AdTitle::new("Bike").unwrap(),
      description: AdDescription::new("Good bike").unwrap(),
      price: Price::new(100.0).unwrap(),
      author_id,
    }
  }

  fn service_with_author(author: Uuid) -> (AdService, Arc<InMemoryAdRepo>, Arc<InMemoryImageLookup>) {
    let repo = Arc::new(InMemoryAdRepo::default().with_author(author, "alice"));
    let images = Arc::new(InMemoryImageLookup::default());
    (AdService::new(repo.clone(), images.clone()), repo, images)
  }

  #[tokio::test]
  async fn test_create_assigns_identity() {
    let author = Uuid::new_v4();
    let (service, _, _) = service_with_author(author);

    let ad = service.create(new_bike(author)).await.unwrap();

    assert!(!ad.id.is_nil());
    assert_eq!(ad.author_id, author);
    assert_eq!(ad.price, 100.0);
  }

  #[tokio::test]
  async fn test_get_by_id_owner_flag() {
    let author = Uuid::new_v4();
    let (service, _, _) = service_with_author(author);
    let ad = service.create(new_bike(author)).await.unwrap();

    // Anonymous viewer
    let details = service.get_by_id(ad.id, None).await.unwrap();
    assert!(!details.is_owner);
    assert_eq!(details.author, "alice");

    // The author
    let details = service.get_by_id(ad.id, Some(author)).await.unwrap();
    assert!(details.is_owner);

    // Someone else
    let details = service.get_by_id(ad.id, Some(Uuid::new_v4())).await.unwrap();
    assert!(!details.is_owner);
  }

  #[tokio::test]
  async fn test_get_by_id_missing_ad() {
    let (service, _, _) = service_with_author(Uuid::new_v4());
    let err = service.get_by_id(Uuid::new_v4(), None).await.unwrap_err();
    assert!(matches!(err, AdsError::NotFound));
  }

  #[tokio::test]
  async fn test_get_by_id_aborts_when_author_lookup_fails() {
    let author = Uuid::new_v4();
    // Repository without any registered author names
    let repo = Arc::new(InMemoryAdRepo::default());
    let images = Arc::new(InMemoryImageLookup::default());
    let service = AdService::new(repo, images);

    let ad = service.create(new_bike(author)).await.unwrap();
    let err = service.get_by_id(ad.id, None).await.unwrap_err();
    assert!(matches!(err, AdsError::AuthorNotFound));
  }

  #[tokio::test]
  async fn test_delete_authorization() {
    let author = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let (service, _, _) = service_with_author(author);
    let ad = service.create(new_bike(author)).await.unwrap();

    // Nonexistent ad
    let err = service.delete(Uuid::new_v4(), author).await.unwrap_err();
    assert!(matches!(err, AdsError::NotFound));

    // Non-owner
    let err = service.delete(ad.id, stranger).await.unwrap_err();
    assert!(matches!(err, AdsError::Forbidden));

    // Owner
    service.delete(ad.id, author).await.unwrap();
    let err = service.get_by_id(ad.id, Some(author)).await.unwrap_err();
    assert!(matches!(err, AdsError::NotFound));
  }

  #[tokio::test]
  async fn test_list_resolves_authors_images_and_ownership() {
    let author = Uuid::new_v4();
    let (service, _, images) = service_with_author(author);
    let ad = service.create(new_bike(author)).await.unwrap();
    images
      .images
      .lock()
      .unwrap()
      .push(AdImage::from_db(
        Uuid::new_v4(),
        ad.id,
        "/static/upload/a.jpg".to_string(),
        ad.created_at,
      ));

    let listings = service
      .list(Some(author), AdListQuery::default())
      .await
      .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].author, "alice");
    assert!(listings[0].is_owner);
    assert_eq!(listings[0].images, vec!["/static/upload/a.jpg".to_string()]);
  }

  #[tokio::test]
  async fn test_list_empty_result_is_not_found() {
    let (service, _, _) = service_with_author(Uuid::new_v4());
    let err = service
      .list(None, AdListQuery::default())
      .await
      .unwrap_err();
    assert!(matches!(err, AdsError::NotFound));
  }

  #[tokio::test]
  async fn test_list_applies_price_window_and_limit() {
    let author = Uuid::new_v4();
    let (service, _, _) = service_with_author(author);
    for price in [50.0, 150.0, 250.0] {
      let mut ad = new_bike(author);
      ad.price = Price::new(price).unwrap();
      service.create(ad).await.unwrap();
    }

    let query = AdListQuery::new(0, 0, "price", "asc", 100.0, 200.0).unwrap();
    let listings = service.list(None, query).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, 150.0);
  }
}
