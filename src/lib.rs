//! 3D Tetris (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `tetris3d::{app,audio,core,input,scores,term,types}`.

pub use tetris3d_app as app;
pub use tetris3d_audio as audio;
pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_scores as scores;
pub use tetris3d_term as term;
pub use tetris3d_types as types;
