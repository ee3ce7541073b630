//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, audio, menus).
//!
//! # Playfield Dimensions
//!
//! The playfield is a 3D grid addressed as `(x, y, z)`:
//!
//! - **Width** (x): 8 columns (indexed 0-7)
//! - **Height** (y): 20 layers (indexed 0-19), `y = 0` is the floor
//! - **Depth** (z): 8 rows (indexed 0-7)
//! - **Spawn position**: `(4, 17, 4)` for every piece
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity: one layer per interval |
//! | `LOADING_DURATION_MS` | 3000 | Loading screen auto-advance |
//!
//! # Camera
//!
//! | Constant | Value |
//! |----------|-------|
//! | `CAMERA_DIST_MIN` | 15.0 |
//! | `CAMERA_DIST_MAX` | 80.0 |
//! | `CAMERA_DIST_DEFAULT` | 30.0 |
//! | `CAMERA_ZOOM_STEP` | 2.0 |
//! | `CAMERA_PITCH_DEFAULT` | 25.0° |
//! | `CAMERA_YAW_DEFAULT` | -45.0° |
//!
//! # Examples
//!
//! ```
//! use tetris3d_types::{Mode, PieceKind, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_code(2).unwrap();
//! assert_eq!(piece, PieceKind::Cube);
//! assert_eq!(piece.color(), (255, 255, 0));
//!
//! assert_eq!(Mode::default(), Mode::Loading);
//!
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT, BOARD_DEPTH), (8, 20, 8));
//! ```

/// Playfield width in cells (x axis)
pub const BOARD_WIDTH: u8 = 8;

/// Playfield height in cells (y axis, up)
pub const BOARD_HEIGHT: u8 = 20;

/// Playfield depth in cells (z axis)
pub const BOARD_DEPTH: u8 = 8;

/// Cells in one horizontal layer
pub const LAYER_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_DEPTH as usize);

/// Total number of cells in the playfield
pub const BOARD_CELLS: usize = LAYER_SIZE * (BOARD_HEIGHT as usize);

/// Largest number of blocks a piece can have (the cube)
pub const MAX_BLOCKS: usize = 8;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: the active piece falls one layer per interval
pub const FALL_INTERVAL_MS: u32 = 500;

/// Loading screen duration before advancing to the main menu
pub const LOADING_DURATION_MS: u32 = 3000;

/// Closest allowed camera distance
pub const CAMERA_DIST_MIN: f32 = 15.0;

/// Farthest allowed camera distance
pub const CAMERA_DIST_MAX: f32 = 80.0;

/// Initial camera distance
pub const CAMERA_DIST_DEFAULT: f32 = 30.0;

/// Distance change per mouse-wheel notch
pub const CAMERA_ZOOM_STEP: f32 = 2.0;

/// Initial up-down camera rotation in degrees
pub const CAMERA_PITCH_DEFAULT: f32 = 25.0;

/// Initial left-right camera rotation in degrees
pub const CAMERA_YAW_DEFAULT: f32 = -45.0;

/// Pitch is clamped to +/- this many degrees
pub const CAMERA_PITCH_LIMIT: f32 = 90.0;

/// Camera rotation per terminal cell of mouse drag, in degrees.
///
/// A terminal cell spans roughly ten pixels, so this matches a 0.3°/pixel
/// drag on a graphical window.
pub const CAMERA_DRAG_DEG_PER_CELL: f32 = 3.0;

/// Main menu camera auto-spin in degrees per millisecond
pub const MENU_SPIN_DEG_PER_MS: f32 = 0.01;

/// Chance (percent) that the attract-mode demo makes a move on a given tick
pub const DEMO_MOVE_PERCENT: u32 = 2;

/// Maximum number of entries kept in the high score table
pub const MAX_HIGHSCORES: usize = 10;

/// High score lines shown on the game over screen
pub const GAME_OVER_HIGHSCORES: usize = 5;

/// Initial music volume in percent
pub const MUSIC_VOLUME_DEFAULT: u8 = 20;

/// Music volume change per key press in percent
pub const MUSIC_VOLUME_STEP: u8 = 10;

/// Points per block when a piece locks
pub const POINTS_PER_BLOCK: u32 = 10;

/// Points for clearing N layers at once (index = N, N <= 4)
///
/// More than four layers scores `N * 100`.
pub const LAYER_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, four blocks in a line
/// - **Cube**: Yellow, 2x2x2 block of eight
/// - **L**: Orange
/// - **J**: Blue (mirror of L)
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    Cube,
    L,
    J,
    T,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in bag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Cube,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::Cube => "cube",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Stable 1-based code used by plain-data snapshots (0 = empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::Cube => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::T => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::Cube),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::T),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Base color as 8-bit RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::Cube => (255, 255, 0),
            PieceKind::L => (255, 165, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::T => (128, 0, 128),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
        }
    }
}

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Game actions that can be applied to modify game state
///
/// Horizontal moves are relative to the camera: the camera decides which
/// grid direction "forward" and "left" map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell to the camera's left
    MoveLeft,
    /// Move piece one cell to the camera's right
    MoveRight,
    /// Move piece one cell away from the camera
    MoveForward,
    /// Move piece one cell toward the camera
    MoveBackward,
    /// Rotate piece 90° counter-clockwise about the vertical axis
    RotateCcw,
    /// Rotate piece 90° clockwise about the vertical axis
    RotateCw,
    /// Rotate piece 90° about the depth axis
    RotateZ,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
}

/// Event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub blocks: u8,
    pub layers_cleared: u32,
    /// Points awarded for this lock (layers plus per-block points)
    pub points: u32,
    /// True when the next piece could not spawn
    pub topped_out: bool,
}

/// Top-level screen the application is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Animated title, advances to the menu on Enter or after a delay
    #[default]
    Loading,
    /// Menu with the attract-mode demo running behind it
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Loading => "loading",
            Mode::MainMenu => "main_menu",
            Mode::Playing => "playing",
            Mode::Paused => "paused",
            Mode::GameOver => "game_over",
        }
    }

    /// Screens that show the playfield behind their overlay
    pub fn shows_scene(&self) -> bool {
        !matches!(self, Mode::Loading)
    }
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a block of that kind
pub type Cell = Option<PieceKind>;

/// Offset of a single block relative to the piece origin `(x, y, z)`
pub type BlockOffset = (i8, i8, i8);
