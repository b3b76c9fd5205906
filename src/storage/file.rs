use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{PlaylistStore, SnapshotStore};
use crate::error::StorageError;
use crate::types::{PlaybackSnapshot, PlaylistEntry};

/// Write `bytes` next to `path` and rename over it
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}

/// Fast snapshot stored as a small JSON file
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create file storage at the given path
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory cannot be created
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<PlaybackSnapshot>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, snapshot: &PlaybackSnapshot) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(snapshot)?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }
}

/// Ordered track list stored as a JSON array of `{id, order}` rows
#[derive(Debug, Clone)]
pub struct JsonPlaylistStore {
    path: PathBuf,
}

impl JsonPlaylistStore {
    /// Create file storage at the given path
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory cannot be created
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(Self { path })
    }
}

#[async_trait]
impl PlaylistStore for JsonPlaylistStore {
    async fn load(&self) -> Result<Vec<PlaylistEntry>, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let bytes = tokio::fs::read(&self.path).await?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        tokio::task::spawn_blocking(move || serde_json::from_slice(&bytes))
            .await
            .map_err(|e| StorageError::Serialization(format!("Deserialization task failed: {e}")))?
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn replace(&self, entries: Vec<PlaylistEntry>) -> Result<(), StorageError> {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let bytes = serde_json::to_vec_pretty(&entries)?;
            write_atomic(&path, &bytes)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Serialization(format!("Serialization task failed: {e}")))?
    }
}
