//! Formation-player drag flows inside a pitch card.

use touchline_board::{BoardEngine, Card, CardGeometry, FormationPlayer, GridMetrics};
use touchline_core::geometry::PlayerPosition;
use touchline_store::MemoryLayoutStore;

const EPSILON: f64 = 1e-9;

fn pitch_card() -> Card {
    Card::new("tactics-pitch", "Formation", CardGeometry::new(0, 0, 8, 8)).with_players(vec![
        FormationPlayer::new("gk", 0.5, 0.9),
        FormationPlayer::new("st", 0.5, 0.2),
    ])
}

fn engine() -> BoardEngine {
    let mut board = BoardEngine::new(
        GridMetrics::new(10, 10, 40.0, 4.0),
        Box::new(MemoryLayoutStore::new()),
    );
    board.set_active_screen("tactics", vec![pitch_card()]);
    board
}

fn position_of(board: &BoardEngine, player_id: &str) -> PlayerPosition {
    board
        .card("tactics-pitch")
        .and_then(|card| card.player(player_id))
        .map(|player| player.position)
        .expect("player")
}

/// Inner pixel extent of the 8-cell pitch: 8*40 + 7*4.
const PITCH: f64 = 348.0;

#[test]
fn test_pixel_delta_converts_to_normalized() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "st");
    board.update_player_drag("tactics-pitch", "st", 34.8, -34.8);
    board.complete_player_drag("tactics-pitch", false);

    let pos = position_of(&board, "st");
    assert!((pos.x - 0.6).abs() < EPSILON);
    assert!((pos.y - 0.1).abs() < EPSILON);
}

#[test]
fn test_token_center_clamps_inside_pitch() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "st");
    board.update_player_drag("tactics-pitch", "st", 10_000.0, -10_000.0);
    board.complete_player_drag("tactics-pitch", false);

    let half_token = 12.0 / PITCH;
    let pos = position_of(&board, "st");
    assert!((pos.x - (1.0 - half_token)).abs() < EPSILON);
    assert!((pos.y - half_token).abs() < EPSILON);
}

#[test]
fn test_cancel_restores_snapshot() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "gk");
    board.update_player_drag("tactics-pitch", "gk", 100.0, -100.0);
    board.complete_player_drag("tactics-pitch", true);

    assert_eq!(position_of(&board, "gk"), PlayerPosition::new(0.5, 0.9));
    assert!(!board.can_undo());
}

#[test]
fn test_commit_records_players_only_history() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "gk");
    board.update_player_drag("tactics-pitch", "gk", 34.8, 0.0);
    board.complete_player_drag("tactics-pitch", false);

    assert!(board.can_undo());
    assert_eq!(board.undo_label(), Some("Move player 'gk'"));

    assert!(board.undo());
    assert_eq!(position_of(&board, "gk"), PlayerPosition::new(0.5, 0.9));
    // The untouched player is part of the snapshot but unchanged
    assert_eq!(position_of(&board, "st"), PlayerPosition::new(0.5, 0.2));

    assert!(board.redo());
    let pos = position_of(&board, "gk");
    assert!((pos.x - 0.6).abs() < EPSILON);
}

#[test]
fn test_drag_without_movement_creates_no_entry() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "gk");
    board.complete_player_drag("tactics-pitch", false);

    assert!(!board.can_undo());
}

#[test]
fn test_stale_player_updates_are_ignored() {
    let mut board = engine();

    board.begin_player_drag("tactics-pitch", "gk");
    board.update_player_drag("tactics-pitch", "st", 100.0, 0.0); // wrong player
    board.update_player_drag("other-card", "gk", 100.0, 0.0); // wrong card
    board.complete_player_drag("tactics-pitch", false);

    assert_eq!(position_of(&board, "gk"), PlayerPosition::new(0.5, 0.9));
    assert_eq!(position_of(&board, "st"), PlayerPosition::new(0.5, 0.2));
}

#[test]
fn test_player_drag_blocked_on_non_formation_card() {
    let mut board = BoardEngine::new(
        GridMetrics::new(10, 10, 40.0, 4.0),
        Box::new(MemoryLayoutStore::new()),
    );
    board.set_active_screen(
        "club-overview",
        vec![Card::new("plain", "Plain", CardGeometry::new(0, 0, 2, 2))],
    );

    board.begin_player_drag("plain", "gk");
    board.update_player_drag("plain", "gk", 50.0, 0.0);
    board.complete_player_drag("plain", false);

    assert!(!board.can_undo());
}

#[test]
fn test_card_drag_and_player_drag_are_mutually_exclusive() {
    let mut board = engine();

    board.begin_drag("tactics-pitch");
    board.begin_player_drag("tactics-pitch", "gk"); // slot is taken
    board.update_player_drag("tactics-pitch", "gk", 100.0, 0.0);
    board.complete_drag("tactics-pitch", true);

    assert_eq!(position_of(&board, "gk"), PlayerPosition::new(0.5, 0.9));
}

#[test]
fn test_positions_survive_screen_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("layout.json");
    let metrics = GridMetrics::new(10, 10, 40.0, 4.0);

    {
        let mut board = BoardEngine::new(
            metrics,
            Box::new(touchline_store::FileLayoutStore::open(&path)),
        );
        board.set_active_screen("tactics", vec![pitch_card()]);
        board.begin_player_drag("tactics-pitch", "gk");
        board.update_player_drag("tactics-pitch", "gk", 34.8, 0.0);
        board.complete_player_drag("tactics-pitch", false);
    }

    let mut board = BoardEngine::new(
        metrics,
        Box::new(touchline_store::FileLayoutStore::open(&path)),
    );
    board.set_active_screen("tactics", vec![pitch_card()]);

    let pos = position_of(&board, "gk");
    assert!((pos.x - 0.6).abs() < EPSILON);
    assert_eq!(position_of(&board, "st"), PlayerPosition::new(0.5, 0.2));
}
