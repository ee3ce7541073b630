//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, bag and scoring.
//! It handles gravity timing, piece movement, rotation, layer clears, and game lifecycle.

use crate::camera::Camera;
use crate::pieces::Piece;
use crate::rng::PieceBag;
use crate::scoring::calculate_score;
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::Board;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    /// The piece that locked most recently (shown as a preview)
    last: Option<Piece>,
    bag: PieceBag,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    layers: u32,
    pieces: u32,
    fall_timer_ms: u32,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            last: None,
            bag: PieceBag::new(seed),
            last_event: None,
            score: 0,
            layers: 0,
            pieces: 0,
            fall_timer_ms: 0,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Clear the playfield, score and pieces; the game must be started again.
    ///
    /// The bag is reshuffled but its RNG keeps running, so consecutive games
    /// see different sequences.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.last = None;
        self.bag.reshuffle();
        self.last_event = None;
        self.score = 0;
        self.layers = 0;
        self.pieces = 0;
        self.fall_timer_ms = 0;
        self.game_over = false;
        self.started = false;
    }

    /// Reset and start in one step
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total layers cleared this game
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Pieces locked this game
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn last_piece(&self) -> Option<&Piece> {
        self.last.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    /// True while the active piece can still be controlled
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && self.active.is_some()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_codes(&mut out.board);
        out.active = if self.game_over { None } else { self.active.clone() };
        out.next = self.next.clone();
        out.last = self.last.clone();
        out.landing_y = if self.game_over { None } else { self.landing_y() };
        out.score = self.score;
        out.layers = self.layers;
        out.pieces = self.pieces;
        out.game_over = self.game_over;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to active and draw a new next piece
    ///
    /// The very first spawn draws both. Returns false (and sets game over)
    /// when the new piece collides where it spawns.
    pub fn spawn_piece(&mut self) -> bool {
        let current = match self.next.take() {
            Some(next) => next,
            None => Piece::new(self.bag.draw()),
        };
        self.next = Some(Piece::new(self.bag.draw()));
        self.fall_timer_ms = 0;

        let blocked = self.collides(&current);
        self.active = Some(current);
        if blocked {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Check if a piece leaves the playfield or overlaps a filled cell
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y, z)| !self.board.is_valid(x, y, z))
    }

    /// Try to move the active piece; reverts on collision
    pub fn try_move(&mut self, dx: i8, dy: i8, dz: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let mut moved = active.clone();
        moved.shift(dx, dy, dz);
        if self.collides(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece `turns` quarter turns about `axis`
    ///
    /// There are no wall kicks: a rotation that collides is reverted.
    pub fn try_rotate(&mut self, axis: Axis, turns: u8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let mut rotated = active.clone();
        rotated.rotate_n(axis, turns);
        if self.collides(&rotated) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Horizontal move with one fallback direction
    pub fn try_shift(&mut self, primary: (i8, i8), alternate: (i8, i8)) -> bool {
        if primary != (0, 0) && self.try_move(primary.0, 0, primary.1) {
            return true;
        }
        alternate != (0, 0) && self.try_move(alternate.0, 0, alternate.1)
    }

    /// Hard drop the active piece to its landing position and lock it
    ///
    /// Returns the number of layers the piece fell, or None without an
    /// active piece.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if self.game_over {
            return None;
        }
        let mut distance = 0u32;
        while self.try_move(0, -1, 0) {
            distance += 1;
        }
        self.active.as_ref()?;
        self.lock_piece();
        Some(distance)
    }

    /// Lock the active piece onto the board and handle layer clears
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let (x, y, z) = active.position();
        self.board.lock_blocks(&active.blocks, x, y, z, active.kind);

        let cleared = self.board.clear_full_layers();
        let result = calculate_score(cleared.len(), active.blocks.len());

        self.score = self.score.saturating_add(result.total);
        self.layers += cleared.len() as u32;
        self.pieces += 1;

        let kind = active.kind;
        let blocks = active.blocks.len() as u8;
        self.last = Some(active);

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            kind,
            blocks,
            layers_cleared: cleared.len() as u32,
            points: result.total,
            topped_out: !spawned,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// The y position where the active piece would land
    pub fn landing_y(&self) -> Option<i8> {
        let active = self.active.as_ref()?;
        let mut probe = active.clone();
        loop {
            probe.shift(0, -1, 0);
            if self.collides(&probe) {
                return Some(probe.y + 1);
            }
        }
    }

    /// Main game tick - advance the gravity timer
    ///
    /// Steps the active piece down one layer per `FALL_INTERVAL_MS`; a piece
    /// that cannot descend locks. Returns true when the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over || !self.started || self.active.is_none() {
            return false;
        }

        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms < FALL_INTERVAL_MS {
            return false;
        }
        self.fall_timer_ms -= FALL_INTERVAL_MS;

        if !self.try_move(0, -1, 0) {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action; horizontal moves are resolved against `camera`
    ///
    /// Returns true when the action changed the game. `Pause` is a session
    /// concern and is never handled here.
    pub fn apply_action(&mut self, action: GameAction, camera: &Camera) -> bool {
        if !self.playable() {
            return false;
        }
        match action {
            GameAction::MoveLeft
            | GameAction::MoveRight
            | GameAction::MoveForward
            | GameAction::MoveBackward => match camera.move_intent(action) {
                Some(intent) => self.try_shift(intent.primary, intent.alternate),
                None => false,
            },
            GameAction::RotateCcw => self.try_rotate(Axis::Y, 1),
            GameAction::RotateCw => self.try_rotate(Axis::Y, 3),
            GameAction::RotateZ => self.try_rotate(Axis::Z, 1),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Pause => false,
        }
    }

    /// Place the active piece (for tests and the demo)
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::SPAWN_POSITION;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert!(!state.started());
        assert!(!state.game_over());
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_start_spawns_active_and_next() {
        let state = started(12345);
        let active = state.active().unwrap();
        assert_eq!(active.position(), SPAWN_POSITION);
        assert!(state.next_piece().is_some());
        assert!(state.last_piece().is_none());
    }

    #[test]
    fn test_next_is_promoted_on_spawn() {
        let mut state = started(7);
        let next_kind = state.next_piece().unwrap().kind;
        state.lock_piece();
        assert_eq!(state.active().unwrap().kind, next_kind);
    }

    #[test]
    fn test_try_move_collision_with_wall() {
        let mut state = started(1);
        let mut moves = 0;
        while state.try_move(1, 0, 0) {
            moves += 1;
            assert!(moves < 20);
        }
        let before = state.active().unwrap().clone();
        assert!(!state.try_move(1, 0, 0));
        assert_eq!(state.active().unwrap(), &before);
    }

    #[test]
    fn test_rotation_reverts_on_collision() {
        let mut state = started(1);
        let mut piece = Piece::new(PieceKind::I);
        piece.x = 4;
        state.set_active(piece.clone());

        // I along +x from x=4 spans 4..7; rotating about Y turns it along +z
        // from z=4, which spans 4..7 and fits.
        assert!(state.try_rotate(Axis::Y, 1));

        // Block the rotated-back position, then the reverse turn must fail.
        state.set_active(piece.clone());
        state.board_mut().set(4, 17, 5, Some(PieceKind::T));
        let before = state.active().unwrap().clone();
        assert!(!state.try_rotate(Axis::Y, 1));
        assert_eq!(state.active().unwrap(), &before);
    }

    #[test]
    fn test_hard_drop_lands_at_landing_y() {
        let mut state = started(12345);
        let landing = state.landing_y().unwrap();
        let kind = state.active().unwrap().kind;
        let blocks = state.active().unwrap().blocks.len();

        let dropped = state.hard_drop().unwrap();
        assert_eq!(dropped as i8, SPAWN_POSITION.1 - landing);
        assert_eq!(state.board().filled_count(), blocks);
        assert_eq!(state.score(), (blocks as u32) * POINTS_PER_BLOCK);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.kind, kind);
        assert_eq!(event.layers_cleared, 0);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_landing_y_on_empty_board_is_floor() {
        let state = started(3);
        let active = state.active().unwrap();
        let min_dy = active.blocks.iter().map(|b| b.1).min().unwrap();
        assert_eq!(state.landing_y(), Some(-min_dy));
    }

    #[test]
    fn test_tick_gravity_steps_once_per_interval() {
        let mut state = started(1);
        let y0 = state.active().unwrap().y;

        assert!(!state.tick(FALL_INTERVAL_MS - 1));
        assert_eq!(state.active().unwrap().y, y0);

        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().y, y0 - 1);
        assert_eq!(state.fall_timer_ms(), 0);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut state = started(1);
        while state.try_move(0, -1, 0) {}
        let pieces_before = state.pieces();
        assert!(state.tick(FALL_INTERVAL_MS));
        assert_eq!(state.pieces(), pieces_before + 1);
        assert!(state.take_last_event().is_some());
    }

    #[test]
    fn test_layer_clear_scores() {
        let mut state = started(1);
        // Fill the floor except where a flat I piece will land.
        state.board_mut().fill_layer(0, PieceKind::Z);
        for x in 0..4 {
            state.board_mut().set(x, 0, 0, None);
        }
        let mut piece = Piece::new(PieceKind::I);
        piece.x = 0;
        piece.y = 5;
        piece.z = 0;
        state.set_active(piece);

        state.hard_drop();
        let event = state.take_last_event().unwrap();
        assert_eq!(event.layers_cleared, 1);
        assert_eq!(event.points, 100 + 40);
        assert_eq!(state.layers(), 1);
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut state = started(1);
        let (x, y, z) = SPAWN_POSITION;
        state.board_mut().set(x, y, z, Some(PieceKind::T));
        state.board_mut().set(x + 1, y, z, Some(PieceKind::T));
        state.board_mut().set(x, y, z + 1, Some(PieceKind::T));
        state.board_mut().set(x + 1, y + 1, z, Some(PieceKind::T));
        state.board_mut().set(x, y + 1, z, Some(PieceKind::T));

        assert!(!state.spawn_piece());
        assert!(state.game_over());
        assert!(!state.try_move(0, -1, 0));
        assert!(!state.tick(10_000));
        assert!(state.snapshot().active.is_none());
    }

    #[test]
    fn test_try_shift_uses_alternate_when_blocked() {
        let mut state = started(1);
        let mut piece = Piece::new(PieceKind::I);
        piece.x = 4; // spans x 4..7, so +x is blocked by the wall
        state.set_active(piece);
        assert!(state.try_shift((1, 0), (0, -1)));
        assert_eq!(state.active().unwrap().position(), (4, 17, 3));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = started(1);
        state.hard_drop();
        state.reset();
        assert!(!state.started());
        assert_eq!(state.score(), 0);
        assert_eq!(state.board().filled_count(), 0);
        assert!(state.active().is_none());
        assert!(state.last_piece().is_none());
    }

    #[test]
    fn test_apply_action_rotations() {
        let mut state = started(1);
        let camera = Camera::new();
        let mut piece = Piece::new(PieceKind::T);
        piece.x = 3;
        piece.y = 10;
        piece.z = 3;
        state.set_active(piece.clone());

        assert!(state.apply_action(GameAction::RotateCcw, &camera));
        assert!(state.apply_action(GameAction::RotateCw, &camera));
        assert_eq!(state.active().unwrap(), &piece);

        assert!(state.apply_action(GameAction::RotateZ, &camera));
        assert!(!state.apply_action(GameAction::Pause, &camera));
    }
}
