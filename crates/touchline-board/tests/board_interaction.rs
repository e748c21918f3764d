//! Drag, selection, and notification flows through the board engine.

use std::sync::{Arc, Mutex};

use touchline_board::{
    BoardEngine, Card, CardGeometry, GridMetrics, SelectModifier,
};
use touchline_core::event_bus::{AppEvent, EventFilter, PreviewEvent};
use touchline_store::MemoryLayoutStore;

fn metrics() -> GridMetrics {
    GridMetrics::new(10, 10, 40.0, 4.0)
}

fn engine() -> BoardEngine {
    BoardEngine::new(metrics(), Box::new(MemoryLayoutStore::new()))
}

fn two_cards() -> Vec<Card> {
    vec![
        Card::new("a", "Card A", CardGeometry::new(0, 0, 2, 2)),
        Card::new("b", "Card B", CardGeometry::new(2, 0, 2, 2)),
    ]
}

fn geometry_of(board: &BoardEngine, id: &str) -> CardGeometry {
    board.card(id).expect("card").geometry
}

#[test]
fn test_colliding_drag_rolls_back() {
    // One cell right lands A on [1,3), overlapping B's [2,4)
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    board.begin_drag("a");
    board.update_drag("a", 44.0, 0.0);
    board.complete_drag("a", false);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 0, 2, 2));
    assert!(!board.can_undo());
}

#[test]
fn test_clean_drag_commits_and_records_history() {
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    board.begin_drag("a");
    board.update_drag("a", 0.0, 132.0); // three cells down
    board.complete_drag("a", false);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 3, 2, 2));
    assert!(board.can_undo());
    assert_eq!(board.undo_label(), Some("Move card 'a'"));
}

#[test]
fn test_canceled_drag_restores_exactly() {
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    board.begin_drag("a");
    board.update_drag("a", 0.0, 132.0);
    board.complete_drag("a", true);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 0, 2, 2));
    assert!(!board.can_undo());
}

#[test]
fn test_group_drag_moves_selection_rigidly() {
    let mut board = engine();
    board.set_active_screen(
        "club-overview",
        vec![
            Card::new("a", "Card A", CardGeometry::new(0, 0, 2, 2)),
            Card::new("b", "Card B", CardGeometry::new(4, 0, 2, 2)),
        ],
    );
    board.select_card("a", SelectModifier::Replace);
    board.select_card("b", SelectModifier::Add);

    board.begin_drag("a");
    board.update_drag("a", 44.0, 44.0);
    board.complete_drag("a", false);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(1, 1, 2, 2));
    assert_eq!(geometry_of(&board, "b"), CardGeometry::new(5, 1, 2, 2));
    assert_eq!(board.undo_label(), Some("Move 2 cards"));
}

#[test]
fn test_group_drag_clamps_each_card_at_edge() {
    // "edge" is already at the left boundary; dragging the pair further
    // left pins it while "free" keeps moving.
    let mut board = engine();
    board.set_active_screen(
        "club-overview",
        vec![
            Card::new("edge", "Edge", CardGeometry::new(0, 0, 2, 2)),
            Card::new("free", "Free", CardGeometry::new(4, 0, 2, 2)),
        ],
    );
    board.select_card("edge", SelectModifier::Replace);
    board.select_card("free", SelectModifier::Add);

    board.begin_drag("free");
    board.update_drag("free", -88.0, 0.0);
    board.complete_drag("free", false);

    assert_eq!(geometry_of(&board, "edge"), CardGeometry::new(0, 0, 2, 2));
    assert_eq!(geometry_of(&board, "free"), CardGeometry::new(2, 0, 2, 2));
}

#[test]
fn test_only_controller_drives_updates() {
    let mut board = engine();
    board.set_active_screen(
        "club-overview",
        vec![
            Card::new("a", "Card A", CardGeometry::new(0, 0, 2, 2)),
            Card::new("b", "Card B", CardGeometry::new(4, 0, 2, 2)),
        ],
    );
    board.select_card("a", SelectModifier::Replace);
    board.select_card("b", SelectModifier::Add);

    board.begin_drag("a");
    board.update_drag("b", 88.0, 0.0); // stale: b did not begin the drag
    board.complete_drag("a", false);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 0, 2, 2));
    assert_eq!(geometry_of(&board, "b"), CardGeometry::new(4, 0, 2, 2));
}

#[test]
fn test_dragging_unselected_card_collapses_selection() {
    let mut board = engine();
    board.set_active_screen(
        "club-overview",
        vec![
            Card::new("a", "Card A", CardGeometry::new(0, 0, 2, 2)),
            Card::new("b", "Card B", CardGeometry::new(4, 0, 2, 2)),
        ],
    );
    board.select_card("a", SelectModifier::Replace);

    board.begin_drag("b");
    board.update_drag("b", 44.0, 0.0);
    board.complete_drag("b", false);

    assert_eq!(board.selected_ids(), vec!["b".to_string()]);
    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 0, 2, 2));
    assert_eq!(geometry_of(&board, "b"), CardGeometry::new(5, 0, 2, 2));
}

#[test]
fn test_second_gesture_is_ignored_while_one_is_active() {
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    board.begin_drag("a");
    board.begin_drag("b"); // slot is taken
    board.update_drag("a", 0.0, 132.0);
    board.complete_drag("a", false);

    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 3, 2, 2));
    assert_eq!(geometry_of(&board, "b"), CardGeometry::new(2, 0, 2, 2));
}

#[test]
fn test_preview_batch_lifecycle() {
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    let previews: Arc<Mutex<Vec<PreviewEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = previews.clone();
    board.events().subscribe(EventFilter::All, move |event| {
        if let AppEvent::Preview(preview) = event {
            sink.lock().unwrap().push(preview);
        }
    });

    board.begin_drag("a");
    board.update_drag("a", 44.0, 0.0);
    board.complete_drag("a", false);

    let previews = previews.lock().unwrap();
    assert_eq!(previews.len(), 3);

    // Initial preview at zero delta is valid
    match &previews[0] {
        PreviewEvent::Updated { snapshots } => {
            assert_eq!(snapshots.len(), 1);
            assert!(snapshots[0].is_valid);
        }
        other => panic!("expected initial update, got {:?}", other),
    }
    // The one-cell shift collides with B
    match &previews[1] {
        PreviewEvent::Updated { snapshots } => {
            assert_eq!(snapshots[0].geometry, CardGeometry::new(1, 0, 2, 2));
            assert!(!snapshots[0].is_valid);
        }
        other => panic!("expected colliding update, got {:?}", other),
    }
    // Completion clears the preview
    assert!(matches!(previews[2], PreviewEvent::Cleared));
}

#[test]
fn test_selection_notifications_fire_on_real_change_only() {
    let mut board = engine();
    board.set_active_screen("club-overview", two_cards());

    let count = Arc::new(Mutex::new(0usize));
    let sink = count.clone();
    board.events().subscribe(EventFilter::All, move |event| {
        if matches!(event, AppEvent::Selection(_)) {
            *sink.lock().unwrap() += 1;
        }
    });

    board.select_card("a", SelectModifier::Replace);
    board.select_card("a", SelectModifier::Replace); // sole selection, no-op
    board.clear_selection();
    board.clear_selection(); // already empty, no-op

    assert_eq!(*count.lock().unwrap(), 2);
}

#[test]
fn test_committed_geometry_survives_screen_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layout.json");

    {
        let mut board = BoardEngine::new(
            metrics(),
            Box::new(touchline_store::FileLayoutStore::open(&path)),
        );
        board.set_active_screen("club-overview", two_cards());
        board.begin_drag("a");
        board.update_drag("a", 0.0, 132.0);
        board.complete_drag("a", false);
    }

    let mut board = BoardEngine::new(
        metrics(),
        Box::new(touchline_store::FileLayoutStore::open(&path)),
    );
    board.set_active_screen("club-overview", two_cards());
    assert_eq!(geometry_of(&board, "a"), CardGeometry::new(0, 3, 2, 2));
    assert_eq!(geometry_of(&board, "b"), CardGeometry::new(2, 0, 2, 2));
}

#[test]
fn test_viewport_culling() {
    let mut board = engine();
    board.set_active_screen(
        "club-overview",
        vec![
            Card::new("top", "Top", CardGeometry::new(0, 0, 2, 2)),
            Card::new("bottom", "Bottom", CardGeometry::new(0, 8, 2, 2)),
        ],
    );

    // Rows 0..2 span pixels 0..84; row 8 starts at 352
    board.set_viewport(0.0, 100.0);
    assert_eq!(board.visible_cards(), vec!["top".to_string()]);

    board.set_viewport(300.0, 200.0);
    assert_eq!(board.visible_cards(), vec!["bottom".to_string()]);

    board.set_viewport(0.0, 1000.0);
    assert_eq!(board.visible_cards().len(), 2);
}
