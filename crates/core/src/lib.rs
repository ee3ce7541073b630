//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the 3D game: the playfield, the pieces and
//! their rotations, the bag randomizer, scoring, and the orbit camera that
//! decides which way "forward" is. It does no I/O, so every rule can be
//! exercised headless with a fixed seed.
//!
//! # Module Structure
//!
//! - [`board`]: 8x20x8 playfield with collision checks and layer clearing
//! - [`camera`]: orbit camera (pitch, yaw, zoom) and camera-relative moves
//! - [`game_state`]: active/next/last pieces, gravity timer, score, lifecycle
//! - [`pieces`]: the seven 3D shapes and quarter-turn rotation about X, Y, Z
//! - [`rng`]: LCG and 7-bag piece generation
//! - [`scoring`]: layer-clear and per-block placement points
//! - [`snapshot`]: plain-data copy of a game for the renderer
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every kind appears once per bag of seven
//! - **No wall kicks**: a rotation that collides is simply undone
//! - **Gravity**: one layer every 500ms; a piece that cannot fall locks at once
//! - **Layer clears**: a full 8x8 layer vanishes and everything above drops
//! - **Scoring**: 100/300/500/800 for 1-4 layers, plus 10 per block placed
//!
//! # Example
//!
//! ```
//! use tetris3d_core::{Camera, GameState};
//! use tetris3d_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! let camera = Camera::new();
//! game.apply_action(GameAction::MoveLeft, &camera);
//! game.apply_action(GameAction::RotateCcw, &camera);
//! game.apply_action(GameAction::HardDrop, &camera);
//!
//! assert!(game.score() > 0); // every placed block scores
//! ```

pub mod board;
pub mod camera;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris3d_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedLayers};
pub use camera::{Camera, MoveIntent};
pub use game_state::GameState;
pub use pieces::{base_shape, rotate_offset, Piece, PieceShape, SPAWN_POSITION};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_layer_score, calculate_placement_score, calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
