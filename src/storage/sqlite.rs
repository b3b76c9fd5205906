use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, params};

use super::PlaylistStore;
use crate::error::StorageError;
use crate::types::{PlaylistEntry, TrackId};

/// Playlist rows kept in an embedded `SQLite` table
#[derive(Debug, Clone)]
pub struct SqlitePlaylistStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePlaylistStore {
    /// Open (or create) the database at `path`
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or initialized
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns error if the schema cannot be created
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS queue_entries (
                id TEXT NOT NULL,
                position INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<R, F>(&self, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<R, StorageError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| StorageError::NotAvailable)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StorageError::Database(format!("database task failed: {e}")))?
    }
}

#[async_trait]
impl PlaylistStore for SqlitePlaylistStore {
    async fn load(&self) -> Result<Vec<PlaylistEntry>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, position FROM queue_entries ORDER BY position")?;
            let rows = stmt.query_map([], |row| {
                Ok(PlaylistEntry {
                    id: TrackId(row.get(0)?),
                    order: row.get(1)?,
                })
            })?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
    }

    async fn replace(&self, entries: Vec<PlaylistEntry>) -> Result<(), StorageError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM queue_entries", [])?;
            {
                let mut stmt =
                    tx.prepare("INSERT INTO queue_entries (id, position) VALUES (?1, ?2)")?;
                for entry in &entries {
                    stmt.execute(params![entry.id.as_str(), entry.order])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
