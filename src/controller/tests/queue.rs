use super::{controller, controller_with, track_names};
use crate::controller::QueueController;
use crate::engine::PlaybackEngine;
use crate::error::QueueError;
use crate::state::QueueEvent;
use crate::testing::{MemoryEngine, create_test_track, create_test_tracks};
use crate::types::QueueConfig;

#[tokio::test]
async fn test_play_next_tags_and_stacks() {
    let controller = controller(&["a", "b", "c", "d"], 0);

    assert!(controller.play_next(vec![create_test_track("x")]).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=1));

    assert!(controller.play_next(vec![create_test_track("y")]).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=2));
    assert_eq!(
        track_names(&controller).await,
        vec!["a", "y", "x", "b", "c", "d"]
    );
    assert!(controller.is_upcoming(2).await.unwrap());
    assert!(!controller.is_upcoming(3).await.unwrap());
}

#[tokio::test]
async fn test_append_extends_run_at_tail() {
    let controller = controller(&["a"], 0);

    assert!(controller.append(vec![create_test_track("x")]).await.unwrap());
    assert!(controller.append(create_test_tracks(&["y", "z"])).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=3));
}

#[tokio::test]
async fn test_insert_outside_run_is_ordinary() {
    let controller = controller(&["a", "b", "c", "d"], 0);

    assert!(!controller.insert(3, vec![create_test_track("x")]).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), None);
    assert_eq!(track_names(&controller).await, vec!["a", "b", "c", "x", "d"]);
}

#[tokio::test]
async fn test_insert_before_current_shifts_it() {
    let controller = controller(&["a", "b", "c"], 1);

    controller.play_next(vec![create_test_track("x")]).await.unwrap();
    controller.insert(0, vec![create_test_track("y")]).await.unwrap();

    assert_eq!(controller.current_index().await.unwrap(), Some(2));
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(3..=3));
}

#[tokio::test]
async fn test_insert_past_end_rejected() {
    let controller = controller(&["a"], 0);

    let result = controller.insert(5, vec![create_test_track("x")]).await;
    assert!(matches!(
        result,
        Err(QueueError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert_eq!(controller.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_sequential_queueing_disabled() {
    let config = QueueConfig::builder().sequential_queueing(false).build();
    let controller = controller_with(&["a", "b"], 0, config);

    assert!(!controller.play_next(vec![create_test_track("x")]).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), None);
    assert_eq!(track_names(&controller).await, vec!["a", "x", "b"]);
}

#[tokio::test]
async fn test_play_next_into_empty_queue() {
    let controller = QueueController::new(MemoryEngine::new(), QueueConfig::default()).unwrap();

    assert!(!controller.play_next(vec![create_test_track("a")]).await.unwrap());
    assert_eq!(controller.current_index().await.unwrap(), Some(0));

    assert!(controller.play_next(vec![create_test_track("b")]).await.unwrap());
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=1));
}

#[tokio::test]
async fn test_remove_current_promotes_next() {
    let controller = controller(&["a", "b", "c"], 1);

    controller.remove_at(1).await.unwrap();

    assert_eq!(controller.current_index().await.unwrap(), Some(1));
    assert_eq!(track_names(&controller).await, vec!["a", "c"]);
}

#[tokio::test]
async fn test_remove_inside_run_keeps_rest() {
    let controller = controller(&["a", "b"], 0);
    controller
        .play_next(create_test_tracks(&["x", "y", "z"]))
        .await
        .unwrap();

    controller.remove_at(2).await.unwrap();

    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=2));
    assert_eq!(track_names(&controller).await, vec!["a", "x", "z", "b"]);
}

#[tokio::test]
async fn test_remove_invalid_ranges() {
    let controller = controller(&["a", "b", "c"], 0);

    assert!(matches!(
        controller.remove(2, 1).await,
        Err(QueueError::InvalidArgument { .. })
    ));
    assert!(matches!(
        controller.remove(0, 9).await,
        Err(QueueError::IndexOutOfRange { .. })
    ));
    assert_eq!(controller.len().await.unwrap(), 3);
}

#[tokio::test]
async fn test_move_out_of_run_untags() {
    let controller = controller(&["a", "b", "c"], 0);
    controller
        .play_next(create_test_tracks(&["x", "y"]))
        .await
        .unwrap();

    // [a, x, y, b, c] -> [a, y, b, c, x]
    controller.move_track(1, 4).await.unwrap();

    assert_eq!(track_names(&controller).await, vec!["a", "y", "b", "c", "x"]);
    assert_eq!(controller.upcoming_range().await.unwrap(), Some(1..=1));
}

#[tokio::test]
async fn test_move_current_backwards_discards_run() {
    let controller = controller(&["a", "b", "c"], 1);
    controller.play_next(vec![create_test_track("x")]).await.unwrap();

    controller.move_track(1, 0).await.unwrap();

    assert_eq!(controller.current_index().await.unwrap(), Some(0));
    assert_eq!(track_names(&controller).await, vec!["b", "a", "x", "c"]);
    assert_eq!(controller.upcoming_range().await.unwrap(), None);
}

#[tokio::test]
async fn test_move_out_of_range() {
    let controller = controller(&["a", "b"], 0);

    assert!(matches!(
        controller.move_track(0, 2).await,
        Err(QueueError::IndexOutOfRange { .. })
    ));
}

#[tokio::test]
async fn test_clear_and_replace() {
    let controller = controller(&["a", "b", "c"], 1);
    controller.play_next(vec![create_test_track("x")]).await.unwrap();

    controller.clear().await.unwrap();
    assert!(controller.is_empty().await.unwrap());
    assert_eq!(controller.current_index().await.unwrap(), None);
    assert_eq!(controller.upcoming_range().await.unwrap(), None);

    controller
        .replace_queue(create_test_tracks(&["d", "e", "f"]), 2, 1_500)
        .await
        .unwrap();
    assert_eq!(controller.current_index().await.unwrap(), Some(2));
    assert_eq!(
        controller.with_engine(|engine| engine.position_ms()).await.unwrap(),
        1_500
    );
}

#[tokio::test]
async fn test_edits_publish_status_and_events() {
    let controller = controller(&["a", "b"], 0);
    let mut status = controller.subscribe();
    let mut events = controller.events().subscribe();

    controller.play_next(vec![create_test_track("x")]).await.unwrap();

    assert!(status.has_changed().unwrap());
    let current = status.borrow_and_update().clone();
    assert_eq!(current.len, 3);
    assert_eq!(current.upcoming, Some(1..=1));

    assert_eq!(
        events.try_recv().unwrap(),
        QueueEvent::TimelineChanged { len: 3 }
    );
    assert_eq!(
        events.try_recv().unwrap(),
        QueueEvent::UpcomingChanged { range: Some(1..=1) }
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_move_publishes_timeline_change() {
    let controller = controller(&["a", "b", "c", "d"], 0);
    let mut events = controller.events().subscribe();

    controller.move_track(2, 3).await.unwrap();

    assert_eq!(
        events.try_recv().unwrap(),
        QueueEvent::TimelineChanged { len: 4 }
    );
    assert!(events.try_recv().is_err());
    assert_eq!(track_names(&controller).await, vec!["a", "b", "d", "c"]);
}

#[tokio::test]
async fn test_same_length_replace_publishes_timeline_change() {
    let controller = controller(&["a", "b", "c", "d"], 0);
    let revision = controller.status().revision;
    let mut events = controller.events().subscribe();

    controller
        .replace_queue(create_test_tracks(&["w", "x", "y", "z"]), 0, 0)
        .await
        .unwrap();

    assert_eq!(
        events.try_recv().unwrap(),
        QueueEvent::TimelineChanged { len: 4 }
    );
    assert!(events.try_recv().is_err());
    assert!(controller.status().revision > revision);
}

#[tokio::test]
async fn test_noop_move_publishes_nothing() {
    let controller = controller(&["a", "b"], 0);
    let mut events = controller.events().subscribe();

    controller.move_track(1, 1).await.unwrap();

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_edit_publishes_nothing() {
    let controller = controller(&["a"], 0);
    let mut events = controller.events().subscribe();

    let _ = controller.move_track(0, 3).await;

    assert!(events.try_recv().is_err());
    assert_eq!(controller.status().len, 1);
}

#[tokio::test]
async fn test_engine_runs_on_playback_thread() {
    let config = QueueConfig::builder()
        .playback_thread_name("queue-playback")
        .build();
    let controller = controller_with(&["a"], 0, config);

    let name = controller
        .with_engine(|_| std::thread::current().name().map(str::to_string))
        .await
        .unwrap();

    assert_eq!(name.as_deref(), Some("queue-playback"));
    assert!(!controller.is_playback_thread());
    controller.shutdown();
}
