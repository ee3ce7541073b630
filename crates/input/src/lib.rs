//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`], music and
//! menu actions, and turns mouse drags and wheel events into camera controls.

pub mod map;
pub mod mouse;

pub use tetris3d_types as types;

pub use map::{menu_action, music_action, play_action, should_quit, MenuAction, MusicAction};
pub use mouse::{CameraAction, MouseTracker};
