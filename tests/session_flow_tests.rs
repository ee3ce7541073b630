//! End-to-end session flow with a silent audio backend, rendered through
//! the terminal view.

use std::fs;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use tetris3d::app::Session;
use tetris3d::audio::{MusicManager, NullBackend};
use tetris3d::scores::HighScoreBook;
use tetris3d::term::{GameView, Viewport};
use tetris3d::types::{Mode, TICK_MS};

fn session(root: &TempDir) -> Session<NullBackend> {
    let songs = root.path().join("Songs");
    fs::create_dir_all(&songs).unwrap();
    fs::write(songs.join("Skyline Run.ogg"), b"").unwrap();
    let scores = HighScoreBook::load(root.path().join("highscores.json"));
    let music = MusicManager::new(NullBackend::new(), songs, root.path().join("Sounds"), 1);
    Session::new(17, scores, music)
}

fn press(s: &mut Session<NullBackend>, code: KeyCode) {
    s.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen_contains(s: &mut Session<NullBackend>, view: &mut GameView, needle: &str) -> bool {
    let frame = s.frame();
    view.render(&frame, Viewport::new(100, 32)).contains_text(needle)
}

#[test]
fn test_screens_follow_modes() {
    let root = TempDir::new().unwrap();
    let mut s = session(&root);
    let mut view = GameView::new();

    assert!(screen_contains(&mut s, &mut view, "LOADING..."));

    press(&mut s, KeyCode::Enter);
    assert!(screen_contains(&mut s, &mut view, "Press [S] to START"));
    assert!(screen_contains(&mut s, &mut view, "No scores yet"));
    assert!(screen_contains(&mut s, &mut view, "♪ Skyline Run  VOL 20%"));

    press(&mut s, KeyCode::Char('s'));
    assert!(screen_contains(&mut s, &mut view, "SCORE: 0"));
    assert!(screen_contains(&mut s, &mut view, "NEXT"));

    press(&mut s, KeyCode::Char('p'));
    assert!(screen_contains(&mut s, &mut view, "PAUSED"));

    press(&mut s, KeyCode::Char('m'));
    assert!(screen_contains(&mut s, &mut view, "MUTED"));
}

#[test]
fn test_played_game_reaches_game_over_and_saves() {
    let root = TempDir::new().unwrap();
    let mut s = session(&root);
    let mut view = GameView::new();

    press(&mut s, KeyCode::Enter);
    press(&mut s, KeyCode::Char('S'));
    assert_eq!(s.mode(), Mode::Playing);

    let mut drops = 0;
    while s.mode() == Mode::Playing {
        press(&mut s, KeyCode::Char(' '));
        s.tick(TICK_MS);
        drops += 1;
        assert!(drops < 200);
    }
    assert_eq!(s.mode(), Mode::GameOver);
    assert!(s.new_highscore());
    assert!(screen_contains(&mut s, &mut view, "GAME OVER"));
    assert!(screen_contains(&mut s, &mut view, "NEW HIGH SCORE!"));
    assert!(screen_contains(&mut s, &mut view, "[R] Restart   [ESC] Main Menu"));

    let saved = HighScoreBook::load(root.path().join("highscores.json"));
    assert_eq!(saved.entries().len(), 1);
    assert_eq!(saved.entries()[0].score, s.game().score());

    press(&mut s, KeyCode::Esc);
    assert_eq!(s.mode(), Mode::MainMenu);
    assert_eq!(s.game().score(), 0);
}

#[test]
fn test_escape_from_play_returns_to_menu() {
    let root = TempDir::new().unwrap();
    let mut s = session(&root);
    press(&mut s, KeyCode::Enter);
    press(&mut s, KeyCode::Char('s'));
    press(&mut s, KeyCode::Char(' '));
    assert!(s.game().score() > 0);

    press(&mut s, KeyCode::Esc);
    assert_eq!(s.mode(), Mode::MainMenu);
    assert!(!s.should_quit());
    assert!(s.scores().is_empty());
}
