use super::*;
use std::time::Duration;

// --- config.rs tests ---

#[test]
fn test_config_defaults() {
    let config = QueueConfig::default();

    assert_eq!(config.save_debounce, Duration::from_millis(500));
    assert!(config.sequential_queueing);
    assert!(config.persist_shuffle_order);
    assert_eq!(config.playback_thread_name, "playback");
    assert_eq!(config.event_capacity, 64);
}

#[test]
fn test_config_builder() {
    let config = QueueConfig::builder()
        .save_debounce(Duration::from_millis(50))
        .sequential_queueing(false)
        .persist_shuffle_order(false)
        .playback_thread_name("engine")
        .event_capacity(0)
        .build();

    assert_eq!(config.save_debounce, Duration::from_millis(50));
    assert!(!config.sequential_queueing);
    assert!(!config.persist_shuffle_order);
    assert_eq!(config.playback_thread_name, "engine");
    assert_eq!(config.event_capacity, 1);
}

// --- track.rs tests ---

#[test]
fn test_track_descriptor_builder() {
    let track = TrackDescriptor::new("t1", "file:///music/t1.flac", "Song")
        .with_artist("Artist")
        .with_album("Album")
        .with_duration_ms(180_000);

    assert_eq!(track.id, TrackId::new("t1"));
    assert_eq!(track.artist.as_deref(), Some("Artist"));
    assert_eq!(track.album.as_deref(), Some("Album"));
    assert_eq!(track.duration_ms, Some(180_000));
}

#[test]
fn test_track_id_display() {
    let id = TrackId::from("abc");
    assert_eq!(id.to_string(), "abc");
    assert_eq!(id.as_str(), "abc");
}

#[test]
fn test_track_descriptor_default() {
    let track = TrackDescriptor::default();

    assert_eq!(track.id, TrackId::default());
    assert!(track.id.as_str().is_empty());
    assert!(track.artist.is_none());
    assert!(track.duration_ms.is_none());
}

// --- state.rs tests ---

#[test]
fn test_repeat_mode_persists_as_integer() {
    assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "2");
    assert_eq!(
        serde_json::from_str::<RepeatMode>("1").unwrap(),
        RepeatMode::One
    );
    assert!(serde_json::from_str::<RepeatMode>("9").is_err());
}

#[test]
fn test_playback_snapshot_layout() {
    let snapshot = PlaybackSnapshot {
        repeat_mode: RepeatMode::All,
        shuffle_enabled: true,
        last_index: 3,
        position_ms: 12_500,
        shuffle: None,
    };

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "repeatMode": 2,
            "shuffleEnabled": true,
            "lastIndex": 3,
            "positionMs": 12_500
        })
    );

    let parsed: PlaybackSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn test_playlist_entries_sorted_by_order() {
    let entries = vec![
        PlaylistEntry {
            id: TrackId::new("b"),
            order: 1,
        },
        PlaylistEntry {
            id: TrackId::new("c"),
            order: 2,
        },
        PlaylistEntry {
            id: TrackId::new("a"),
            order: 0,
        },
    ];

    let ids = PlaylistEntry::into_ids(entries);
    assert_eq!(
        ids,
        vec![TrackId::new("a"), TrackId::new("b"), TrackId::new("c")]
    );
}

#[test]
fn test_playlist_entries_numbered() {
    let entries = PlaylistEntry::from_ids(vec![TrackId::new("x"), TrackId::new("y")]);
    assert_eq!(entries[0].order, 0);
    assert_eq!(entries[1].order, 1);
    assert_eq!(entries[1].id, TrackId::new("y"));
}
