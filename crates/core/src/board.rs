//! Board module - manages the 3D playfield
//!
//! The board is an 8x20x8 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y, z) where x ranges 0..7, y ranges 0..19 (floor to top), z ranges 0..7.
//! Storage is layer-major: every horizontal layer `y` is one contiguous run of cells.

use arrayvec::ArrayVec;

use crate::types::{
    BlockOffset, Cell, PieceKind, BOARD_CELLS, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, LAYER_SIZE,
};

/// Layer indices cleared by a single lock, bottom to top
pub type ClearedLayers = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The playfield - 8 wide x 20 tall x 8 deep using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, layer-major order ((y * DEPTH + z) * WIDTH + x)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (x, y, z) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8, z: i8) -> Option<usize> {
        if Self::out_of_bounds(x, y, z) {
            return None;
        }
        Some(((y as usize) * (BOARD_DEPTH as usize) + (z as usize)) * (BOARD_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn out_of_bounds(x: i8, y: i8, z: i8) -> bool {
        x < 0
            || x >= BOARD_WIDTH as i8
            || y < 0
            || y >= BOARD_HEIGHT as i8
            || z < 0
            || z >= BOARD_DEPTH as i8
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    pub fn depth(&self) -> u8 {
        BOARD_DEPTH
    }

    /// Get cell at position (x, y, z)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8, z: i8) -> Option<Cell> {
        Self::index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y, z)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, z: i8, cell: Cell) -> bool {
        match Self::index(x, y, z) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8, z: i8) -> bool {
        matches!(self.get(x, y, z), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8, z: i8) -> bool {
        matches!(self.get(x, y, z), Some(Some(_)))
    }

    fn layer_range(y: usize) -> std::ops::Range<usize> {
        let start = y * LAYER_SIZE;
        start..start + LAYER_SIZE
    }

    /// Check if a horizontal layer is completely filled
    pub fn is_layer_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.cells[Self::layer_range(y)].iter().all(|cell| cell.is_some())
    }

    /// Clear all full layers and return their indices (sorted bottom to top)
    ///
    /// Layers above a cleared layer move down; the vacated layers at the top
    /// become empty. Single pass, zero-allocation.
    pub fn clear_full_layers(&mut self) -> ClearedLayers {
        let mut cleared = ClearedLayers::new();
        let mut write_y = 0usize;

        // Scan from the floor up, compacting surviving layers downward.
        for read_y in 0..BOARD_HEIGHT as usize {
            if self.is_layer_full(read_y) {
                cleared.push(read_y as u8);
                continue;
            }
            if write_y != read_y {
                self.cells
                    .copy_within(Self::layer_range(read_y), write_y * LAYER_SIZE);
            }
            write_y += 1;
        }

        for y in write_y..BOARD_HEIGHT as usize {
            self.cells[Self::layer_range(y)].fill(None);
        }

        cleared
    }

    /// Write a piece's blocks into the grid at the given position
    ///
    /// Blocks that fall outside the playfield are skipped. Returns the number
    /// of blocks actually written.
    pub fn lock_blocks(&mut self, blocks: &[BlockOffset], x: i8, y: i8, z: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for &(dx, dy, dz) in blocks {
            if self.set(x + dx, y + dy, z + dz, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Number of filled cells in one layer
    pub fn layer_count(&self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }
        self.cells[Self::layer_range(y)].iter().filter(|c| c.is_some()).count()
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as plain piece codes (0 = empty) in storage order
    pub fn write_codes(&self, out: &mut [u8; BOARD_CELLS]) {
        for (dst, cell) in out.iter_mut().zip(self.cells.iter()) {
            *dst = cell.map(|k| k.code()).unwrap_or(0);
        }
    }

    /// Fill a whole layer (for tests and benches)
    pub fn fill_layer(&mut self, y: usize, kind: PieceKind) {
        if y < BOARD_HEIGHT as usize {
            self.cells[Self::layer_range(y)].fill(Some(kind));
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
