use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem store for transient uploaded images.
///
/// Every stored image gets a fresh v4 UUID name, so concurrent uploads never
/// collide. Images live only for the duration of one request: stored before
/// generation, deleted after it.
pub struct LocalImageStore {
    root: PathBuf,
}

/// Handle to an image written by [`LocalImageStore::save`].
#[derive(Debug)]
pub struct StoredImage {
    path: PathBuf,
}

impl StoredImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the full upload contents under a unique name. Only the
    /// extension of the original filename is kept; it may be absent.
    pub async fn save(&self, original_filename: &str, data: &[u8]) -> Result<StoredImage> {
        let unique_name = match Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.root.join(unique_name);

        if let Err(e) = tokio::fs::write(&path, data).await {
            // A failed write can leave a partial file behind.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e).with_context(|| format!("failed to store upload at {}", path.display()));
        }

        tracing::info!("Image saved to {}", path.display());
        Ok(StoredImage { path })
    }

    /// Delete a stored image. A file that is already gone is logged at warn
    /// level and treated as success.
    pub async fn remove(&self, image: &StoredImage) -> Result<()> {
        match tokio::fs::remove_file(&image.path).await {
            Ok(()) => {
                tracing::info!("Image deleted: {}", image.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Image not found for deletion at {}", image.path.display());
                Ok(())
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to delete {}", image.path.display()))
            }
        }
    }
}
