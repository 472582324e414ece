use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::clients::{catalog::CatalogClient, errors::Error};
use crate::genre_index::{GenreIndex, GenreIndexBuilder};

const CACHE_FILE_NAME: &str = ".genrefy_index.json";

// Caches the built genre index on disk as JSON so it isn't rebuilt on every run.
// A missing or unreadable file is treated as a cache miss, never as an error.
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IndexStore { path: path.into() }
    }

    pub fn try_default() -> Self {
        let path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(CACHE_FILE_NAME);
        IndexStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Option<GenreIndex> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No cached genre index at {:?}: {e}", self.path);
                return None;
            }
        };

        match serde_json::from_slice::<GenreIndex>(&contents) {
            Ok(index) if !index.is_empty() && index.is_complete() => {
                debug!("Loaded {} tracks from {:?}", index.len(), self.path);
                Some(index)
            }
            Ok(_) => {
                warn!("Cached genre index at {:?} is incomplete, ignoring it", self.path);
                None
            }
            Err(e) => {
                warn!("Cached genre index at {:?} is corrupt, ignoring it: {e}", self.path);
                None
            }
        }
    }

    // Write to a sibling file first so a crash never leaves a half-written index behind
    pub async fn store(&self, index: &GenreIndex) -> Result<(), Error> {
        let contents = serde_json::to_vec(index)?;
        let tmp_path = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!("Stored {} tracks in {:?}", index.len(), self.path);
        Ok(())
    }

    pub async fn invalidate(&self) -> Result<(), Error> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed cached genre index {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e)),
        }
    }

    // Return the cached index, or build a fresh one and cache it
    pub async fn load_or_build<C: CatalogClient>(
        &self,
        builder: &GenreIndexBuilder<'_, C>,
        force_refresh: bool,
    ) -> Result<GenreIndex, Error> {
        if force_refresh {
            self.invalidate().await?;
        } else if let Some(index) = self.load().await {
            return Ok(index);
        }

        let index = builder.build().await?;
        if let Err(e) = self.store(&index).await {
            warn!("Could not cache genre index at {:?}: {e}", self.path);
        } else {
            info!("Cached {} tracks in {:?}", index.len(), self.path);
        }
        Ok(index)
    }
}
