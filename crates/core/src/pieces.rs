//! Pieces module - 3D piece shapes and quarter-turn rotation
//!
//! Shapes are lists of block offsets from the piece origin. Rotation turns
//! every offset 90° about one axis through the origin; there are no wall
//! kicks, so callers revert a rotation that collides.

use arrayvec::ArrayVec;

use crate::types::{Axis, BlockOffset, PieceKind, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, MAX_BLOCKS};

/// Block offsets of a piece (up to eight for the cube)
pub type PieceShape = ArrayVec<BlockOffset, MAX_BLOCKS>;

/// Spawn position for new pieces (x, y, z): centred, three layers below the top
pub const SPAWN_POSITION: (i8, i8, i8) = (
    (BOARD_WIDTH / 2) as i8,
    (BOARD_HEIGHT - 3) as i8,
    (BOARD_DEPTH / 2) as i8,
);

const I_SHAPE: [BlockOffset; 4] = [(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)];
const CUBE_SHAPE: [BlockOffset; 8] = [
    (0, 0, 0),
    (1, 0, 0),
    (0, 1, 0),
    (1, 1, 0),
    (0, 0, 1),
    (1, 0, 1),
    (0, 1, 1),
    (1, 1, 1),
];
const L_SHAPE: [BlockOffset; 4] = [(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)];
const J_SHAPE: [BlockOffset; 4] = [(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0)];
const T_SHAPE: [BlockOffset; 4] = [(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)];
const S_SHAPE: [BlockOffset; 4] = [(1, 0, 0), (2, 0, 0), (0, 1, 0), (1, 1, 0)];
const Z_SHAPE: [BlockOffset; 4] = [(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)];

/// Get the unrotated block offsets for a piece kind
pub fn base_shape(kind: PieceKind) -> &'static [BlockOffset] {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::Cube => &CUBE_SHAPE,
        PieceKind::L => &L_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
    }
}

/// Rotate one offset a quarter turn about `axis` (right-hand rule)
#[inline]
pub fn rotate_offset((x, y, z): BlockOffset, axis: Axis) -> BlockOffset {
    match axis {
        Axis::X => (x, -z, y),
        Axis::Y => (-z, y, x),
        Axis::Z => (-y, x, z),
    }
}

/// A piece: kind, current (rotated) block offsets and grid position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub blocks: PieceShape,
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Piece {
    /// Create a new piece with its base shape at spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y, z) = SPAWN_POSITION;
        Self {
            kind,
            blocks: base_shape(kind).iter().copied().collect(),
            x,
            y,
            z,
        }
    }

    pub fn position(&self) -> (i8, i8, i8) {
        (self.x, self.y, self.z)
    }

    /// Translate the piece in place
    pub fn shift(&mut self, dx: i8, dy: i8, dz: i8) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotate a quarter turn about `axis` in place
    pub fn rotate(&mut self, axis: Axis) {
        for b in self.blocks.iter_mut() {
            *b = rotate_offset(*b, axis);
        }
    }

    /// Rotate `turns` quarter turns about `axis`
    pub fn rotate_n(&mut self, axis: Axis, turns: u8) {
        for _ in 0..(turns % 4) {
            self.rotate(axis);
        }
    }

    /// Absolute grid coordinates of every block
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, i8)> + '_ {
        self.blocks
            .iter()
            .map(move |&(dx, dy, dz)| (self.x + dx, self.y + dy, self.z + dz))
    }

    /// Min and max block offsets (inclusive), for centring previews
    pub fn bounds(&self) -> (BlockOffset, BlockOffset) {
        let mut min = (i8::MAX, i8::MAX, i8::MAX);
        let mut max = (i8::MIN, i8::MIN, i8::MIN);
        for &(x, y, z) in &self.blocks {
            min = (min.0.min(x), min.1.min(y), min.2.min(z));
            max = (max.0.max(x), max.1.max(y), max.2.max(z));
        }
        if self.blocks.is_empty() {
            return ((0, 0, 0), (0, 0, 0));
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        assert_eq!(SPAWN_POSITION, (4, 17, 4));
        let piece = Piece::new(PieceKind::T);
        assert_eq!(piece.position(), (4, 17, 4));
    }

    #[test]
    fn test_block_counts() {
        assert_eq!(base_shape(PieceKind::Cube).len(), 8);
        for kind in PieceKind::ALL {
            if kind != PieceKind::Cube {
                assert_eq!(base_shape(kind).len(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_rotate_offset_each_axis() {
        assert_eq!(rotate_offset((1, 2, 3), Axis::X), (1, -3, 2));
        assert_eq!(rotate_offset((1, 2, 3), Axis::Y), (-3, 2, 1));
        assert_eq!(rotate_offset((1, 2, 3), Axis::Z), (-2, 1, 3));
    }

    #[test]
    fn test_four_turns_is_identity() {
        for kind in PieceKind::ALL {
            for axis in Axis::ALL {
                let original = Piece::new(kind);
                let mut piece = original.clone();
                for _ in 0..4 {
                    piece.rotate(axis);
                }
                assert_eq!(piece, original);
            }
        }
    }

    #[test]
    fn test_single_turn_of_bar() {
        let turned = |axis| {
            let mut piece = Piece::new(PieceKind::I);
            piece.rotate(axis);
            piece.blocks.to_vec()
        };
        assert_eq!(turned(Axis::X), vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        assert_eq!(turned(Axis::Y), vec![(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3)]);
        assert_eq!(turned(Axis::Z), vec![(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0)]);

        // L foot lifts off the floor when turned about x
        let mut piece = Piece::new(PieceKind::L);
        piece.rotate(Axis::X);
        assert_eq!(piece.blocks.to_vec(), vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 0, 1)]);
    }

    #[test]
    fn test_rotate_n_matches_repeated_offsets() {
        for kind in PieceKind::ALL {
            let expected: Vec<BlockOffset> = base_shape(kind)
                .iter()
                .map(|&b| rotate_offset(rotate_offset(rotate_offset(b, Axis::Y), Axis::Y), Axis::Y))
                .collect();
            let mut piece = Piece::new(kind);
            piece.rotate_n(Axis::Y, 3);
            assert_eq!(piece.blocks.to_vec(), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_bounds() {
        let piece = Piece::new(PieceKind::L);
        assert_eq!(piece.bounds(), ((0, 0, 0), (2, 1, 0)));
    }
}
