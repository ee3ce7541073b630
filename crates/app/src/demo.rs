//! Attract mode: a game that plays itself behind the main menu.

use tetris3d_core::{GameState, SimpleRng};
use tetris3d_types::{Axis, DEMO_MOVE_PERCENT};

const SHIFTS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// What the demo tried on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoMove {
    Shift { dx: i8, dz: i8 },
    Rotate(Axis),
    Drop,
}

#[derive(Debug, Clone)]
pub struct DemoPlayer {
    rng: SimpleRng,
}

impl DemoPlayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Roll for a random move and apply it to `game`.
    ///
    /// Shifts and rotations are collision-checked like player input. The
    /// roll happens even when the move is then blocked.
    pub fn step(&mut self, game: &mut GameState) -> Option<DemoMove> {
        if !game.playable() || !self.rng.chance_percent(DEMO_MOVE_PERCENT) {
            return None;
        }

        let chosen = match self.rng.next_range(3) {
            0 => {
                let (dx, dz) = SHIFTS[self.rng.next_range(SHIFTS.len() as u32) as usize];
                game.try_move(dx, 0, dz);
                DemoMove::Shift { dx, dz }
            }
            1 => {
                let axis = Axis::ALL[self.rng.next_range(3) as usize];
                game.try_rotate(axis, 1);
                DemoMove::Rotate(axis)
            }
            _ => {
                game.hard_drop();
                DemoMove::Drop
            }
        };
        Some(chosen)
    }

    /// Advance the demo game by `elapsed_ms`, restarting it after a top-out.
    pub fn tick(&mut self, game: &mut GameState, elapsed_ms: u32) -> Option<DemoMove> {
        if !game.started() {
            game.start();
        }
        let chosen = self.step(game);
        game.tick(elapsed_ms);
        game.take_last_event();
        if game.game_over() {
            game.restart();
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris3d_types::TICK_MS;

    #[test]
    fn demo_moves_are_rare() {
        let mut game = GameState::new(9);
        game.start();
        let mut demo = DemoPlayer::new(11);
        let moves = (0..1000).filter(|_| demo.step(&mut game).is_some()).count();
        assert!(moves > 0);
        assert!(moves < 100, "expected about 2% of ticks, got {moves}");
    }

    #[test]
    fn demo_keeps_running_after_top_out() {
        let mut game = GameState::new(4);
        let mut demo = DemoPlayer::new(4);
        for _ in 0..20_000 {
            demo.tick(&mut game, TICK_MS);
            assert!(!game.game_over());
        }
        assert!(game.active().is_some());
    }

    #[test]
    fn demo_starts_an_idle_game() {
        let mut game = GameState::new(1);
        let mut demo = DemoPlayer::new(1);
        demo.tick(&mut game, TICK_MS);
        assert!(game.started());
        assert!(game.active().is_some());
    }
}
