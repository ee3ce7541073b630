//! The 3D playfield scene: grid, locked blocks, the active piece and its
//! landing indicators, plus the small piece previews.

use crate::core::{GameSnapshot, Piece};
use crate::fb::Rgb;
use crate::raster::{Canvas, Projection, Vec3, FACE_NEIGHBORS};
use crate::types::{PieceKind, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};

/// Clear colour of every 3D view.
pub const BACKGROUND: Rgb = Rgb::new(13, 13, 26);

const GRID_COLOR: Rgb = Rgb::new(102, 102, 204);
const FLOOR_ALPHA: f32 = 0.6;
const WALL_ALPHA: f32 = 0.3;
const GUIDE_ALPHA: f32 = 0.3;

/// Locked and active blocks are drawn slightly smaller than a cell.
const BLOCK_SIZE: f32 = 0.9;

pub fn piece_rgb(kind: PieceKind) -> Rgb {
    Rgb::from_tuple(kind.color())
}

fn cell_center(x: i8, y: i8, z: i8) -> Vec3 {
    Vec3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5)
}

/// Draw the whole playfield.
///
/// With `indicators` set, the active piece gets guide lines down to where
/// it would land and wire cubes at the landing cells.
pub fn draw_scene(canvas: &mut Canvas, proj: &Projection, snap: &GameSnapshot, indicators: bool) {
    canvas.clear(BACKGROUND);

    draw_locked_blocks(canvas, proj, snap);

    if let Some(active) = &snap.active {
        draw_piece(canvas, proj, active);
        if indicators {
            if let Some(landing_y) = snap.landing_y {
                draw_landing_indicators(canvas, proj, active, landing_y);
            }
        }
    }

    // Lines go last: they blend over whatever is in front of them.
    draw_grid(canvas, proj);
}

fn draw_grid(canvas: &mut Canvas, proj: &Projection) {
    let (w, h, d) = (BOARD_WIDTH as f32, BOARD_HEIGHT as f32, BOARD_DEPTH as f32);

    // Floor
    for x in 0..=BOARD_WIDTH {
        let x = x as f32;
        canvas.draw_line(proj, Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, d), GRID_COLOR, FLOOR_ALPHA);
    }
    for z in 0..=BOARD_DEPTH {
        let z = z as f32;
        canvas.draw_line(proj, Vec3::new(0.0, 0.0, z), Vec3::new(w, 0.0, z), GRID_COLOR, FLOOR_ALPHA);
    }

    // Back wall
    for x in 0..=BOARD_WIDTH {
        let x = x as f32;
        canvas.draw_line(proj, Vec3::new(x, 0.0, 0.0), Vec3::new(x, h, 0.0), GRID_COLOR, WALL_ALPHA);
    }
    for y in 0..=BOARD_HEIGHT {
        let y = y as f32;
        canvas.draw_line(proj, Vec3::new(0.0, y, 0.0), Vec3::new(w, y, 0.0), GRID_COLOR, WALL_ALPHA);
    }
}

fn draw_locked_blocks(canvas: &mut Canvas, proj: &Projection, snap: &GameSnapshot) {
    for y in 0..BOARD_HEIGHT as i8 {
        for z in 0..BOARD_DEPTH as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let Some(kind) = snap.cell(x, y, z) else {
                    continue;
                };
                let hidden = FACE_NEIGHBORS.map(|(dx, dy, dz)| snap.cell(x + dx, y + dy, z + dz).is_some());
                canvas.draw_cube(proj, cell_center(x, y, z), BLOCK_SIZE, piece_rgb(kind), hidden);
            }
        }
    }
}

fn draw_piece(canvas: &mut Canvas, proj: &Projection, piece: &Piece) {
    let color = piece_rgb(piece.kind);
    for &(bx, by, bz) in &piece.blocks {
        let hidden = FACE_NEIGHBORS.map(|(dx, dy, dz)| piece.blocks.contains(&(bx + dx, by + dy, bz + dz)));
        let (x, y, z) = (piece.x + bx, piece.y + by, piece.z + bz);
        canvas.draw_cube(proj, cell_center(x, y, z), BLOCK_SIZE, color, hidden);
    }
}

fn draw_landing_indicators(canvas: &mut Canvas, proj: &Projection, piece: &Piece, landing_y: i8) {
    let color = piece_rgb(piece.kind);
    let white = Rgb::new(255, 255, 255);
    for &(bx, by, bz) in &piece.blocks {
        let (x, y, z) = (piece.x + bx, piece.y + by, piece.z + bz);
        let from = cell_center(x, y, z);
        let to = cell_center(x, landing_y + by, z);
        canvas.draw_line(proj, from, to, white, GUIDE_ALPHA);

        canvas.draw_wire_cube(proj, to, 0.95, color, 0.4);
        canvas.draw_wire_cube(proj, to, 0.85, color, 0.2);
    }
}

/// Draw a piece alone, centred on its bounding box, with the preview camera.
pub fn draw_piece_preview(canvas: &mut Canvas, piece: &Piece) {
    canvas.clear(BACKGROUND);
    let proj = Projection::preview();
    let (min, max) = piece.bounds();
    let centre = Vec3::new(
        (min.0 + max.0) as f32 / 2.0,
        (min.1 + max.1) as f32 / 2.0,
        (min.2 + max.2) as f32 / 2.0,
    );
    let color = piece_rgb(piece.kind);
    for &(bx, by, bz) in &piece.blocks {
        let hidden = FACE_NEIGHBORS.map(|(dx, dy, dz)| piece.blocks.contains(&(bx + dx, by + dy, bz + dz)));
        let p = Vec3::new(bx as f32, by as f32, bz as f32) - centre;
        canvas.draw_cube(&proj, p, BLOCK_SIZE, color, hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Camera, GameState};

    fn count_pixels(canvas: &Canvas, color: Rgb) -> usize {
        (0..canvas.width())
            .flat_map(|x| (0..canvas.height()).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn empty_scene_is_background_and_grid() {
        let mut canvas = Canvas::for_cells(60, 20);
        let snap = GameSnapshot::default();
        draw_scene(&mut canvas, &Projection::orbit(&Camera::new(), 0.0), &snap, true);
        let total = canvas.width() as usize * canvas.height() as usize;
        let bg = count_pixels(&canvas, BACKGROUND);
        assert!(bg < total, "grid lines should be visible");
        assert!(bg > total / 2);
    }

    #[test]
    fn active_piece_is_drawn() {
        let mut state = GameState::new(3);
        state.start();
        let snap = state.snapshot();

        let mut with_piece = Canvas::for_cells(60, 20);
        draw_scene(&mut with_piece, &Projection::orbit(&Camera::new(), 0.0), &snap, false);

        let mut empty = Canvas::for_cells(60, 20);
        draw_scene(&mut empty, &Projection::orbit(&Camera::new(), 0.0), &GameSnapshot::default(), false);

        assert!(count_pixels(&with_piece, BACKGROUND) < count_pixels(&empty, BACKGROUND));
    }

    #[test]
    fn preview_is_centred() {
        let mut canvas = Canvas::for_cells(20, 10);
        draw_piece_preview(&mut canvas, &Piece::new(PieceKind::Cube));
        assert_ne!(canvas.pixel(10, 10), Some(BACKGROUND));
        assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
    }
}
