use super::{MemoryEngine, create_test_tracks};
use crate::engine::{PlaybackEngine, Timeline};
use crate::shuffle::LinearOrder;
use crate::types::TrackId;

#[test]
fn test_first_insert_selects_slot_zero() {
    let mut engine = MemoryEngine::new();
    assert_eq!(engine.current_index(), None);

    engine.insert_tracks(0, create_test_tracks(&["a", "b"]));
    assert_eq!(engine.current_index(), Some(0));
    assert_eq!(engine.len(), 2);
}

#[test]
fn test_insert_before_current_shifts() {
    let mut engine = MemoryEngine::with_tracks(create_test_tracks(&["a", "b", "c"]), 1);
    engine.insert_tracks(1, create_test_tracks(&["x"]));
    assert_eq!(engine.current_index(), Some(2));

    engine.insert_tracks(3, create_test_tracks(&["y"]));
    assert_eq!(engine.current_index(), Some(2));
}

#[test]
fn test_remove_current_promotes_following() {
    let mut engine = MemoryEngine::with_tracks(create_test_tracks(&["a", "b", "c", "d"]), 1);
    engine.set_position_ms(5_000);

    engine.remove_tracks(1, 3);
    assert_eq!(engine.current_index(), Some(1));
    assert_eq!(engine.track(1).unwrap().id, TrackId::new("d"));
    assert_eq!(engine.position_ms(), 0);
}

#[test]
fn test_remove_tail_with_current_clamps() {
    let mut engine = MemoryEngine::with_tracks(create_test_tracks(&["a", "b", "c"]), 2);
    engine.remove_tracks(1, 3);
    assert_eq!(engine.current_index(), Some(0));

    engine.remove_tracks(0, 1);
    assert_eq!(engine.current_index(), None);
    assert!(engine.is_empty());
}

#[test]
fn test_move_adjusts_current() {
    let mut engine = MemoryEngine::with_tracks(create_test_tracks(&["a", "b", "c", "d"]), 2);

    engine.move_track(0, 3);
    assert_eq!(engine.current_index(), Some(1));
    assert_eq!(
        engine.track_ids(),
        vec![
            TrackId::new("b"),
            TrackId::new("c"),
            TrackId::new("d"),
            TrackId::new("a")
        ]
    );

    engine.move_track(1, 0);
    assert_eq!(engine.current_index(), Some(0));
}

#[test]
fn test_set_tracks_clamps_start() {
    let mut engine = MemoryEngine::new();
    engine.set_tracks(create_test_tracks(&["a", "b"]), 9, 1_000);
    assert_eq!(engine.current_index(), Some(1));
    assert_eq!(engine.position_ms(), 1_000);

    engine.set_tracks(Vec::new(), 0, 1_000);
    assert_eq!(engine.current_index(), None);
    assert_eq!(engine.position_ms(), 0);
}

#[test]
fn test_seek_ignores_out_of_range() {
    let mut engine = MemoryEngine::with_tracks(create_test_tracks(&["a", "b"]), 0);
    engine.seek(5, 10);
    assert_eq!(engine.current_index(), Some(0));
    engine.seek(1, 10);
    assert_eq!(engine.current_index(), Some(1));
    assert_eq!(engine.position_ms(), 10);
}

#[test]
fn test_installed_order() {
    let mut engine = MemoryEngine::new();
    assert!(engine.shuffle_order().is_none());

    engine.set_shuffle_order(Some(Box::new(LinearOrder::new(3))));
    assert_eq!(engine.shuffle_order().unwrap().first(), Some(0));
}
