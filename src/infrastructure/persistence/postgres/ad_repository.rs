use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::ads::entities::Ad;
use crate::domain::ads::errors::AdsError;
use crate::domain::ads::ports::AdRepository;
use crate::domain::ads::value_objects::AdListQuery;

/// Database row structure for the ads table
#[derive(Debug, FromRow)]
struct AdRow {
  id: Uuid,
  title: String,
  description: String,
  price: f64,
  created_at: DateTime<Utc>,
  author_id: Uuid,
}

impl AdRow {
  fn into_entity(self) -> Ad {
    Ad::from_db(
      self.id,
      self.title,
      self.description,
      self.price,
      self.created_at,
      self.author_id,
    )
  }
}

/// PostgreSQL implementation of the AdRepository trait
pub struct PostgresAdRepository {
  pool: PgPool,
}

impl PostgresAdRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl AdRepository for PostgresAdRepository {
  async fn create(&self, ad: Ad) -> Result<Ad, AdsError> {
    let row = sqlx::query_as::<_, AdRow>(
      r#"
            INSERT INTO ads (id, title, description, price, created_at, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, price, created_at, author_id
            "#,
    )
    .bind(ad.id)
    .bind(&ad.title)
    .bind(&ad.description)
    .bind(ad.price)
    .bind(ad.created_at)
    .bind(ad.author_id)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create ad: {}", e);
      AdsError::from(e)
    })?;

    Ok(row.into_entity())
  }

  async fn find_by_id(&self, ad_id: Uuid) -> Result<Option<Ad>, AdsError> {
    let row = sqlx::query_as::<_, AdRow>(
      r#"
            SELECT id, title, description, price, created_at, author_id
            FROM ads
            WHERE id = $1
            "#,
    )
    .bind(ad_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find ad by id: {}", e);
      AdsError::from(e)
    })?;

    Ok(row.map(AdRow::into_entity))
  }

  /// Builds the listing query dynamically: optional price window, then
  /// ORDER BY from the allow-listed enums, then LIMIT/OFFSET. An empty page
  /// is reported as `NotFound`.
  async fn list(&self, query: &AdListQuery) -> Result<Vec<Ad>, AdsError> {
    let mut builder: QueryBuilder<Postgres> =
      QueryBuilder::new("SELECT id, title, description, price, created_at, author_id FROM ads");

    match (query.price_min, query.price_max) {
      (Some(min), Some(max)) => {
        builder.push(" WHERE price >= ");
        builder.push_bind(min);
        builder.push(" AND price <= ");
        builder.push_bind(max);
      }
      (Some(min), None) => {
        builder.push(" WHERE price >= ");
        builder.push_bind(min);
      }
      (None, Some(max)) => {
        builder.push(" WHERE price <= ");
        builder.push_bind(max);
      }
      (None, None) => {}
    }

    // Sort column and direction come from closed enums, never from raw input
    builder.push(format_args!(
      " ORDER BY {} {}",
      query.sort_by.column(),
      query.order.keyword()
    ));

    builder.push(" LIMIT ");
    builder.push_bind(query.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.offset);

    let rows: Vec<AdRow> = builder
      .build_query_as()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to list ads: {}", e);
        AdsError::from(e)
      })?;

    if rows.is_empty() {
      return Err(AdsError::NotFound);
    }

    Ok(rows.into_iter().map(AdRow::into_entity).collect())
  }

  /// Delete scoped by both id and author; the affected-row count lets the
  /// service distinguish a lost race from success
  async fn delete_for_author(&self, ad_id: Uuid, author_id: Uuid) -> Result<u64, AdsError> {
    let result = sqlx::query(r#"DELETE FROM ads WHERE id = $1 AND author_id = $2"#)
      .bind(ad_id)
      .bind(author_id)
      .execute(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to delete ad: {}", e);
        AdsError::from(e)
      })?;

    Ok(result.rows_affected())
  }

  async fn find_author_name(&self, author_id: Uuid) -> Result<Option<String>, AdsError> {
    let username: Option<String> =
      sqlx::query_scalar(r#"SELECT username FROM users WHERE id = $1"#)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to find author name: {}", e);
          AdsError::from(e)
        })?;

    Ok(username)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  async fn create_test_user(pool: &PgPool, username: &str) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query(
      r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, 'hash', now())
            "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(format!("{}_{}@example.com", username, user_id))
    .execute(pool)
    .await
    .expect("Failed to create test user");
    user_id
  }

  fn bike(author_id: Uuid, price: f64) -> Ad {
    use crate::domain::ads::value_objects::{AdDescription, AdTitle, Price};
    Ad::new(
      AdTitle::new("Bike").unwrap(),
      AdDescription::new("Good bike").unwrap(),
      Price::new(price).unwrap(),
      author_id,
    )
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_create_and_find_ad() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAdRepository::new(pool.clone());

    let author = create_test_user(&pool, "alice").await;
    let ad = repo.create(bike(author, 100.0)).await.unwrap();

    let found = repo.find_by_id(ad.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Bike");
    assert_eq!(found.author_id, author);

    assert_eq!(
      repo.find_author_name(author).await.unwrap().as_deref(),
      Some("alice")
    );
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_list_price_window_and_order() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAdRepository::new(pool.clone());

    let author = create_test_user(&pool, "alice").await;
    for price in [50.0, 150.0, 250.0] {
      repo.create(bike(author, price)).await.unwrap();
    }

    let query = AdListQuery::new(0, 0, "price", "asc", 100.0, 300.0).unwrap();
    let ads = repo.list(&query).await.unwrap();
    let prices: Vec<f64> = ads.iter().map(|a| a.price).collect();
    assert_eq!(prices, vec![150.0, 250.0]);

    // Empty page is an error, not an empty vec
    let query = AdListQuery::new(0, 0, "", "", 1000.0, 2000.0).unwrap();
    assert!(matches!(repo.list(&query).await, Err(AdsError::NotFound)));
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_delete_is_scoped_by_author() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresAdRepository::new(pool.clone());

    let author = create_test_user(&pool, "alice").await;
    let stranger = create_test_user(&pool, "bob").await;
    let ad = repo.create(bike(author, 100.0)).await.unwrap();

    assert_eq!(repo.delete_for_author(ad.id, stranger).await.unwrap(), 0);
    assert_eq!(repo.delete_for_author(ad.id, author).await.unwrap(), 1);
    assert!(repo.find_by_id(ad.id).await.unwrap().is_none());
  }
}
