use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::AdsError;

const TITLE_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const DEFAULT_LIMIT: i64 = 10;

// ============================================================================
// AdTitle Value Object
// ============================================================================

/// Ad title, at most 50 characters (Unicode scalar count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdTitle(String);

impl AdTitle {
  pub fn new(title: impl Into<String>) -> Result<Self, AdsError> {
    let title = title.into();
    if title.chars().count() > TITLE_MAX_CHARS {
      return Err(AdsError::TitleTooLong);
    }
    Ok(Self(title))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for AdTitle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// AdDescription Value Object
// ============================================================================

/// Ad description, at most 1000 characters (Unicode scalar count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDescription(String);

impl AdDescription {
  pub fn new(description: impl Into<String>) -> Result<Self, AdsError> {
    let description = description.into();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
      return Err(AdsError::DescriptionTooLong);
    }
    Ok(Self(description))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Price Value Object
// ============================================================================

/// Strictly positive, finite price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
  pub fn new(price: f64) -> Result<Self, AdsError> {
    if !price.is_finite() || price <= 0.0 {
      return Err(AdsError::InvalidPrice);
    }
    Ok(Self(price))
  }

  pub fn value(&self) -> f64 {
    self.0
  }
}

// ============================================================================
// List query (sorting, pagination, price window)
// ============================================================================

/// Sort field allow-list for ad listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
  CreatedAt,
  Price,
}

impl SortField {
  /// Parses a raw query value; anything outside the allow-list falls back
  /// to `CreatedAt`
  pub fn parse(raw: &str) -> Self {
    match raw {
      "price" => SortField::Price,
      _ => SortField::CreatedAt,
    }
  }

  /// Column name used in ORDER BY clauses
  pub fn column(&self) -> &'static str {
    match self {
      SortField::CreatedAt => "created_at",
      SortField::Price => "price",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
  Asc,
  Desc,
}

impl SortOrder {
  /// Parses a raw query value; anything unrecognized falls back to `Desc`
  pub fn parse(raw: &str) -> Self {
    match raw {
      "asc" => SortOrder::Asc,
      _ => SortOrder::Desc,
    }
  }

  pub fn keyword(&self) -> &'static str {
    match self {
      SortOrder::Asc => "ASC",
      SortOrder::Desc => "DESC",
    }
  }
}

/// Normalized ad listing query.
///
/// `new` validates the raw request values and applies the defaults: limit 0
/// becomes 10, unknown sort fields become `created_at`, unknown orders
/// become `desc`. Price bounds are kept only when positive.
#[derive(Debug, Clone)]
pub struct AdListQuery {
  pub limit: i64,
  pub offset: i64,
  pub sort_by: SortField,
  pub order: SortOrder,
  pub price_min: Option<f64>,
  pub price_max: Option<f64>,
}

impl AdListQuery {
  pub fn new(
    limit: i64,
    offset: i64,
    sort_by: &str,
    order: &str,
    price_min: f64,
    price_max: f64,
  ) -> Result<Self, AdsError> {
    if limit < 0 {
      return Err(AdsError::InvalidLimit);
    }
    if offset < 0 {
      return Err(AdsError::InvalidOffset);
    }
    if price_min < 0.0 || price_max < 0.0 {
      return Err(AdsError::InvalidPrice);
    }
    if price_min > 0.0 && price_max > 0.0 && price_max < price_min {
      return Err(AdsError::InvalidPrice);
    }

    Ok(Self {
      limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
      offset,
      sort_by: SortField::parse(sort_by),
      order: SortOrder::parse(order),
      price_min: (price_min > 0.0).then_some(price_min),
      price_max: (price_max > 0.0).then_some(price_max),
    })
  }
}

impl Default for AdListQuery {
  fn default() -> Self {
    Self {
      limit: DEFAULT_LIMIT,
      offset: 0,
      sort_by: SortField::CreatedAt,
      order: SortOrder::Desc,
      price_min: None,
      price_max: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_title_length_limit() {
    assert!(AdTitle::new("Bike").is_ok());
    assert!(AdTitle::new("x".repeat(50)).is_ok());
    assert!(matches!(
      AdTitle::new("x".repeat(51)),
      Err(AdsError::TitleTooLong)
    ));
    // Limit counts characters, not bytes
    assert!(AdTitle::new("ё".repeat(50)).is_ok());
  }

  #[test]
  fn test_description_length_limit() {
    assert!(AdDescription::new("Good bike").is_ok());
    assert!(matches!(
      AdDescription::new("x".repeat(1001)),
      Err(AdsError::DescriptionTooLong)
    ));
  }

  #[test]
  fn test_price_must_be_positive_and_finite() {
    assert!(Price::new(100.0).is_ok());
    assert!(Price::new(0.0).is_err());
    assert!(Price::new(-1.0).is_err());
    assert!(Price::new(f64::NAN).is_err());
    assert!(Price::new(f64::INFINITY).is_err());
  }

  #[test]
  fn test_query_defaults() {
    let q = AdListQuery::new(0, 0, "", "", 0.0, 0.0).unwrap();
    assert_eq!(q.limit, 10);
    assert_eq!(q.sort_by, SortField::CreatedAt);
    assert_eq!(q.order, SortOrder::Desc);
    assert!(q.price_min.is_none());
    assert!(q.price_max.is_none());
  }

  #[test]
  fn test_query_unknown_sort_falls_back() {
    let q = AdListQuery::new(5, 0, "author_id; DROP TABLE ads", "sideways", 0.0, 0.0).unwrap();
    assert_eq!(q.sort_by, SortField::CreatedAt);
    assert_eq!(q.order, SortOrder::Desc);
    assert_eq!(q.limit, 5);
  }

  #[test]
  fn test_query_allow_listed_sort() {
    let q = AdListQuery::new(0, 0, "price", "asc", 0.0, 0.0).unwrap();
    assert_eq!(q.sort_by, SortField::Price);
    assert_eq!(q.order, SortOrder::Asc);
  }

  #[test]
  fn test_query_price_window_validation() {
    assert!(matches!(
      AdListQuery::new(0, -1, "", "", 0.0, 0.0),
      Err(AdsError::InvalidOffset)
    ));
    assert!(matches!(
      AdListQuery::new(-1, 0, "", "", 0.0, 0.0),
      Err(AdsError::InvalidLimit)
    ));
    assert!(matches!(
      AdListQuery::new(0, 0, "", "", -5.0, 0.0),
      Err(AdsError::InvalidPrice)
    ));
    assert!(matches!(
      AdListQuery::new(0, 0, "", "", 100.0, 50.0),
      Err(AdsError::InvalidPrice)
    ));

    let q = AdListQuery::new(0, 0, "", "", 50.0, 100.0).unwrap();
    assert_eq!(q.price_min, Some(50.0));
    assert_eq!(q.price_max, Some(100.0));

    // A single positive bound is a half-open window
    let q = AdListQuery::new(0, 0, "", "", 0.0, 100.0).unwrap();
    assert!(q.price_min.is_none());
    assert_eq!(q.price_max, Some(100.0));
  }
}
