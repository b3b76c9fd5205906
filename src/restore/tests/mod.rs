
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::RestorationCoordinator;
use crate::controller::QueueController;
use crate::error::{Result, StorageError};
use crate::repository::{MemoryRepository, Resolution, TrackRepository};
use crate::storage::{MemoryStorage, PlaylistStore, SnapshotStore};
use crate::testing::{MemoryEngine, create_test_tracks};
use crate::types::{PlaybackSnapshot, PlaylistEntry, QueueConfig, RestoredQueue, TrackId};

struct Fixture {
    coordinator: Arc<RestorationCoordinator<MemoryEngine>>,
    storage: Arc<MemoryStorage>,
    repository: Arc<MemoryRepository>,
}

impl Fixture {
    fn new(storage: MemoryStorage, repository: MemoryRepository) -> Self {
        Self::with_engine(storage, repository, MemoryEngine::new(), QueueConfig::default())
    }

    fn with_engine(
        storage: MemoryStorage,
        repository: MemoryRepository,
        engine: MemoryEngine,
        config: QueueConfig,
    ) -> Self {
        let controller = Arc::new(QueueController::new(engine, config).unwrap());
        let storage = Arc::new(storage);
        let repository = Arc::new(repository);
        let coordinator = Arc::new(RestorationCoordinator::with_storage(
            controller,
            repository.clone(),
            storage.clone(),
        ));
        Self {
            coordinator,
            storage,
            repository,
        }
    }

    fn controller(&self) -> &QueueController<MemoryEngine> {
        self.coordinator.controller()
    }
}

fn saved(ids: &[&str], last_index: usize, position_ms: u64) -> MemoryStorage {
    let snapshot = PlaybackSnapshot {
        last_index,
        position_ms,
        ..PlaybackSnapshot::default()
    };
    MemoryStorage::with_saved(snapshot, playlist(ids))
}

fn playlist(ids: &[&str]) -> Vec<PlaylistEntry> {
    PlaylistEntry::from_ids(ids.iter().map(|id| TrackId::new(*id)).collect())
}

fn library(ids: &[&str]) -> MemoryRepository {
    MemoryRepository::with_tracks(create_test_tracks(ids))
}

/// Slot a listener writes the delivered queue into
fn capture_queue() -> (
    Arc<Mutex<Option<RestoredQueue>>>,
    impl FnOnce(&RestoredQueue) + Send + 'static,
) {
    let slot = Arc::new(Mutex::new(None));
    let writer = slot.clone();
    (slot, move |queue: &RestoredQueue| {
        *writer.lock().unwrap() = Some(queue.clone());
    })
}

/// Storage whose every operation fails
struct FailingStorage;

impl SnapshotStore for FailingStorage {
    fn load(&self) -> std::result::Result<Option<PlaybackSnapshot>, StorageError> {
        Err(StorageError::NotAvailable)
    }

    fn save(&self, _snapshot: &PlaybackSnapshot) -> std::result::Result<(), StorageError> {
        Err(StorageError::NotAvailable)
    }
}

#[async_trait]
impl PlaylistStore for FailingStorage {
    async fn load(&self) -> std::result::Result<Vec<PlaylistEntry>, StorageError> {
        Err(StorageError::NotAvailable)
    }

    async fn replace(&self, _entries: Vec<PlaylistEntry>) -> std::result::Result<(), StorageError> {
        Err(StorageError::NotAvailable)
    }
}

/// Repository that panics on lookup
struct PanickingRepository;

#[async_trait]
impl TrackRepository for PanickingRepository {
    async fn resolve(&self, _ids: &[TrackId]) -> Result<Resolution> {
        panic!("library unavailable");
    }
}
