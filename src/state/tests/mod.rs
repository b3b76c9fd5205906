use super::*;
use crate::types::RepeatMode;

#[tokio::test]
async fn test_status_subscription() {
    let container = StatusContainer::new();
    let mut rx = container.subscribe();

    assert_eq!(rx.borrow().len, 0);

    container.set(QueueStatus {
        len: 3,
        current: Some(1),
        ..Default::default()
    });

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().current, Some(1));
    assert_eq!(container.get().len, 3);
}

#[tokio::test]
async fn test_status_unchanged_does_not_notify() {
    let container = StatusContainer::new();
    let rx = container.subscribe();

    container.set(QueueStatus::default());
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn test_event_diff() {
    let old = QueueStatus {
        len: 3,
        revision: 1,
        current: Some(0),
        upcoming: None,
        shuffle: false,
        repeat: RepeatMode::Off,
    };
    let new = QueueStatus {
        len: 5,
        revision: 2,
        current: Some(0),
        upcoming: Some(1..=2),
        shuffle: false,
        repeat: RepeatMode::All,
    };

    assert_eq!(
        QueueEvent::diff(&old, &new),
        vec![
            QueueEvent::TimelineChanged { len: 5 },
            QueueEvent::UpcomingChanged { range: Some(1..=2) },
            QueueEvent::RepeatChanged {
                mode: RepeatMode::All
            },
        ]
    );
    assert!(QueueEvent::diff(&new, &new).is_empty());
}

#[test]
fn test_event_diff_same_length_edit() {
    let old = QueueStatus {
        len: 4,
        revision: 7,
        ..Default::default()
    };
    let new = QueueStatus {
        revision: 8,
        ..old.clone()
    };

    assert_eq!(
        QueueEvent::diff(&old, &new),
        vec![QueueEvent::TimelineChanged { len: 4 }]
    );
}

#[tokio::test]
async fn test_event_bus() {
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 1);

    bus.emit(QueueEvent::ShuffleChanged { enabled: true });

    let event = rx.recv().await.unwrap();
    assert_eq!(event, QueueEvent::ShuffleChanged { enabled: true });
}

#[tokio::test]
async fn test_event_filter() {
    let bus = EventBus::new(8);
    let mut filter = EventFilter::restoration(&bus);

    bus.emit(QueueEvent::TimelineChanged { len: 1 });
    bus.emit(QueueEvent::Restored { track_count: 4 });

    let event = filter.recv().await.unwrap();
    assert_eq!(event, QueueEvent::Restored { track_count: 4 });
}

#[tokio::test]
async fn test_timeline_filter() {
    let bus = EventBus::new(8);
    let mut filter = EventFilter::timeline_events(&bus);

    bus.emit(QueueEvent::ShuffleChanged { enabled: false });
    bus.emit(QueueEvent::CurrentChanged { index: Some(2) });

    let event = filter.recv().await.unwrap();
    assert_eq!(event, QueueEvent::CurrentChanged { index: Some(2) });
}
