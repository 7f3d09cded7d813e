use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::images::errors::ImageError;
use crate::domain::images::ports::BlobStore;

/// Filesystem blob store.
///
/// Writes uploaded bytes under a local directory and returns URLs beneath a
/// public base path; the HTTP server serves that directory as static files.
pub struct LocalBlobStore {
  root: PathBuf,
  public_base: String,
}

impl LocalBlobStore {
  pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      public_base: public_base.into(),
    }
  }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
  async fn save(&self, filename: &str, data: &[u8]) -> Result<String, ImageError> {
    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|e| ImageError::Storage(format!("Failed to create upload dir: {}", e)))?;

    let path = self.root.join(filename);
    tokio::fs::write(&path, data)
      .await
      .map_err(|e| ImageError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!("Stored blob at {}", path.display());

    Ok(format!(
      "{}/{}",
      self.public_base.trim_end_matches('/'),
      filename
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_save_writes_file_and_returns_public_url() {
    let dir = std::env::temp_dir().join(format!("adboard-test-{}", Uuid::new_v4()));
    let store = LocalBlobStore::new(&dir, "/static/upload/");

    let url = store.save("pic.jpg", b"fake-jpeg-bytes").await.unwrap();
    assert_eq!(url, "/static/upload/pic.jpg");

    let on_disk = tokio::fs::read(dir.join("pic.jpg")).await.unwrap();
    assert_eq!(on_disk, b"fake-jpeg-bytes");

    tokio::fs::remove_dir_all(&dir).await.ok();
  }
}
