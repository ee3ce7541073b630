//! Game flow through the facade: spawning, gravity, drops and game over.

use tetris3d::core::{Camera, GameState, Piece};
use tetris3d::types::{GameAction, PieceKind, BOARD_HEIGHT, FALL_INTERVAL_MS, TICK_MS};

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert!(state.active().is_none());

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert!(state.next_piece().is_some());
    assert!(!state.game_over());
}

#[test]
fn test_hard_drop_lands_and_locks() {
    let mut state = GameState::new(5);
    state.start();
    state.set_active(Piece::new(PieceKind::T));
    let landing = state.landing_y().unwrap();
    assert_eq!(landing, 0);

    let fell = state.hard_drop().unwrap();
    assert_eq!(fell, 17);
    assert_eq!(state.pieces(), 1);
    assert_eq!(state.score(), 40);
    // T lies in the x-y plane: three blocks on the floor, one above.
    assert_eq!(state.board().layer_count(0), 3);
    assert_eq!(state.board().layer_count(1), 1);
    assert_eq!(state.last_piece().map(|p| p.kind), Some(PieceKind::T));

    let event = state.take_last_event().unwrap();
    assert_eq!(event.points, 40);
    assert!(!event.topped_out);
}

#[test]
fn test_gravity_runs_on_session_ticks() {
    let mut state = GameState::new(8);
    state.start();
    let y0 = state.active().unwrap().y;

    let mut elapsed = 0;
    while elapsed + TICK_MS < FALL_INTERVAL_MS {
        state.tick(TICK_MS);
        elapsed += TICK_MS;
    }
    assert_eq!(state.active().unwrap().y, y0);

    state.tick(TICK_MS);
    assert_eq!(state.active().unwrap().y, y0 - 1);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut state = GameState::new(21);
    state.start();
    let mut drops = 0;
    while !state.game_over() {
        assert!(state.hard_drop().is_some());
        drops += 1;
        assert!(drops < 200, "pieces never reached the top");
    }
    assert!(state.board().layer_count(BOARD_HEIGHT as usize - 3) > 0);
    assert!(!state.apply_action(GameAction::HardDrop, &Camera::new()));
    assert!(state.snapshot().active.is_none());
}

#[test]
fn test_camera_relative_moves() {
    let mut state = GameState::new(2);
    state.start();
    state.set_active(Piece::new(PieceKind::Cube));

    // Facing -z: W moves toward the back wall.
    let camera = Camera::with_angles(25.0, 0.0);
    assert!(state.apply_action(GameAction::MoveForward, &camera));
    assert_eq!(state.active().unwrap().z, 3);

    // Turned to +x: W moves right.
    let camera = Camera::with_angles(25.0, 90.0);
    assert!(state.apply_action(GameAction::MoveForward, &camera));
    assert_eq!(state.active().unwrap().x, 5);
}
