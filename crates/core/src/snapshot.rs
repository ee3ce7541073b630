//! Snapshot module - plain-data view of a game for rendering
//!
//! A [`GameSnapshot`] is copied out of [`GameState`](crate::GameState) once
//! per frame so the renderer never borrows live game state.

use crate::pieces::Piece;
use crate::types::{PieceKind, BOARD_CELLS, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};

/// Plain-data copy of everything the renderer needs from a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Piece codes in board storage order (0 = empty)
    pub board: [u8; BOARD_CELLS],
    pub active: Option<Piece>,
    pub next: Option<Piece>,
    pub last: Option<Piece>,
    pub landing_y: Option<i8>,
    pub score: u32,
    pub layers: u32,
    pub pieces: u32,
    pub game_over: bool,
    pub started: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [0u8; BOARD_CELLS];
        self.active = None;
        self.next = None;
        self.last = None;
        self.landing_y = None;
        self.score = 0;
        self.layers = 0;
        self.pieces = 0;
        self.game_over = false;
        self.started = false;
    }

    /// Locked block at `(x, y, z)`, or None when empty or out of bounds.
    pub fn cell(&self, x: i8, y: i8, z: i8) -> Option<PieceKind> {
        if x < 0
            || y < 0
            || z < 0
            || x >= BOARD_WIDTH as i8
            || y >= BOARD_HEIGHT as i8
            || z >= BOARD_DEPTH as i8
        {
            return None;
        }
        let idx = ((y as usize) * (BOARD_DEPTH as usize) + (z as usize)) * (BOARD_WIDTH as usize) + (x as usize);
        PieceKind::from_code(self.board[idx])
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// FNV-1a hash of the visible state, for redraw throttling.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();
        h.write(&self.board);
        if let Some(active) = &self.active {
            h.write(&[active.kind.code(), active.x as u8, active.y as u8, active.z as u8]);
            for &(x, y, z) in &active.blocks {
                h.write(&[x as u8, y as u8, z as u8]);
            }
        }
        if let Some(next) = &self.next {
            h.write(&[next.kind.code()]);
        }
        h.write(&self.score.to_le_bytes());
        h.write(&[self.game_over as u8, self.started as u8]);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [0u8; BOARD_CELLS],
            active: None,
            next: None,
            last: None,
            landing_y: None,
            score: 0,
            layers: 0,
            pieces: 0,
            game_over: false,
            started: false,
        }
    }
}

struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x00000100000001B3);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
