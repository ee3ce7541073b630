//! Scoring module
//!
//! Two sources of points:
//! - Layer clears, scored per lock by how many layers cleared together.
//! - Placement, a flat amount per block of every locked piece.

use crate::types::{LAYER_SCORES, POINTS_PER_BLOCK};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub layer_score: u32,
    pub placement_score: u32,
    pub total: u32,
}

/// Points for clearing `layers` layers with one lock
///
/// 1 → 100, 2 → 300, 3 → 500, 4 → 800; beyond four, 100 per layer.
pub fn calculate_layer_score(layers: usize) -> u32 {
    match LAYER_SCORES.get(layers) {
        Some(&points) => points,
        None => (layers as u32).saturating_mul(100),
    }
}

/// Points for locking a piece of `blocks` blocks
pub fn calculate_placement_score(blocks: usize) -> u32 {
    (blocks as u32).saturating_mul(POINTS_PER_BLOCK)
}

/// Calculate complete score for a lock
pub fn calculate_score(layers: usize, blocks: usize) -> ScoreResult {
    let layer_score = calculate_layer_score(layers);
    let placement_score = calculate_placement_score(blocks);
    ScoreResult {
        layer_score,
        placement_score,
        total: layer_score.saturating_add(placement_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_scores() {
        assert_eq!(calculate_layer_score(0), 0);
        assert_eq!(calculate_layer_score(1), 100);
        assert_eq!(calculate_layer_score(2), 300);
        assert_eq!(calculate_layer_score(3), 500);
        assert_eq!(calculate_layer_score(4), 800);
        assert_eq!(calculate_layer_score(5), 500);
        assert_eq!(calculate_layer_score(6), 600);
    }

    #[test]
    fn test_placement_score() {
        assert_eq!(calculate_placement_score(4), 40);
        assert_eq!(calculate_placement_score(8), 80);
    }

    #[test]
    fn test_calculate_score_total() {
        let r = calculate_score(2, 8);
        assert_eq!(r.layer_score, 300);
        assert_eq!(r.placement_score, 80);
        assert_eq!(r.total, 380);
    }
}
