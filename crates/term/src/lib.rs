//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. Instead of
//! widgets and layout it rasterizes the 3D playfield into a pixel canvas,
//! packs two pixels per cell with half-block glyphs, overlays the HUD text
//! and flushes only the changed cells.
//!
//! Pipeline:
//! - [`raster`]: projection, z-buffered cubes and translucent lines
//! - [`scene`]: playfield grid, blocks, landing indicators, piece previews
//! - [`game_view`]: per-mode screens and HUD into a [`FrameBuffer`]
//! - [`renderer`]: diff encoding and terminal setup/teardown

pub mod fb;
pub mod game_view;
pub mod raster;
pub mod render_throttle;
pub mod renderer;
pub mod scene;

pub use tetris3d_core as core;
pub use tetris3d_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{Frame, GameView, MusicStatus, Viewport, TITLE};
pub use raster::{Canvas, Projection, Vec3};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
