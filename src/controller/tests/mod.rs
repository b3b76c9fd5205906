mod queue;

use super::QueueController;
use crate::testing::{MemoryEngine, create_test_tracks};
use crate::types::QueueConfig;

fn controller(ids: &[&str], current: usize) -> QueueController<MemoryEngine> {
    controller_with(ids, current, QueueConfig::default())
}

fn controller_with(
    ids: &[&str],
    current: usize,
    config: QueueConfig,
) -> QueueController<MemoryEngine> {
    QueueController::new(MemoryEngine::with_tracks(create_test_tracks(ids), current), config)
        .unwrap()
}

async fn track_names(controller: &QueueController<MemoryEngine>) -> Vec<String> {
    controller
        .track_ids()
        .await
        .unwrap()
        .into_iter()
        .map(|id| id.0)
        .collect()
}
