//! Key mapping from terminal events to game, menu and music actions.
//!
//! The tables are independent: the session decides which ones apply in
//! which mode. Letters match either case.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Music controls, available in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    ToggleMute,
    VolumeUp,
    VolumeDown,
    NextSong,
}

/// Screen navigation outside of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Enter (skips the loading screen)
    Confirm,
    /// S on the main menu
    Start,
    /// R on the game over screen
    Restart,
    /// Esc: back to the menu, or quit from the menu
    Back,
}

/// Map keyboard input to in-game actions.
pub fn play_action(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Camera-relative movement
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::MoveForward),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::MoveBackward),

        // Rotation
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::RotateCcw),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(GameAction::RotateCw),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::RotateZ),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Map keyboard input to music controls.
pub fn music_action(key: KeyEvent) -> Option<MusicAction> {
    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(MusicAction::ToggleMute),
        KeyCode::Char('7') => Some(MusicAction::VolumeUp),
        KeyCode::Char('6') => Some(MusicAction::VolumeDown),
        KeyCode::Char('8') => Some(MusicAction::NextSong),
        _ => None,
    }
}

/// Map keyboard input to menu navigation.
pub fn menu_action(key: KeyEvent) -> Option<MenuAction> {
    match key.code {
        KeyCode::Enter => Some(MenuAction::Confirm),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MenuAction::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MenuAction::Restart),
        KeyCode::Esc => Some(MenuAction::Back),
        _ => None,
    }
}

/// Check if key should quit the game from any mode.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(play_action(key('a')), Some(GameAction::MoveLeft));
        assert_eq!(play_action(key('D')), Some(GameAction::MoveRight));
        assert_eq!(play_action(key('w')), Some(GameAction::MoveForward));
        assert_eq!(play_action(key('S')), Some(GameAction::MoveBackward));
        assert_eq!(play_action(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(play_action(key('q')), Some(GameAction::RotateCcw));
        assert_eq!(play_action(key('E')), Some(GameAction::RotateCw));
        assert_eq!(play_action(key('r')), Some(GameAction::RotateZ));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(play_action(key(' ')), Some(GameAction::HardDrop));
        assert_eq!(play_action(key('p')), Some(GameAction::Pause));
        assert_eq!(play_action(key('P')), Some(GameAction::Pause));
    }

    #[test]
    fn test_music_keys() {
        assert_eq!(music_action(key('m')), Some(MusicAction::ToggleMute));
        assert_eq!(music_action(key('M')), Some(MusicAction::ToggleMute));
        assert_eq!(music_action(key('7')), Some(MusicAction::VolumeUp));
        assert_eq!(music_action(key('6')), Some(MusicAction::VolumeDown));
        assert_eq!(music_action(key('8')), Some(MusicAction::NextSong));
        assert_eq!(music_action(key('9')), None);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(menu_action(KeyEvent::from(KeyCode::Enter)), Some(MenuAction::Confirm));
        assert_eq!(menu_action(key('s')), Some(MenuAction::Start));
        assert_eq!(menu_action(key('R')), Some(MenuAction::Restart));
        assert_eq!(menu_action(KeyEvent::from(KeyCode::Esc)), Some(MenuAction::Back));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        // Plain q rotates; it must not quit.
        assert!(!should_quit(key('q')));
        assert!(!should_quit(key('c')));
    }
}
