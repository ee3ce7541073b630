//! Session: the mode state machine tying game, camera, input, high scores
//! and music together.
//!
//! The session owns everything the binary's loop touches. It is driven by
//! three calls: [`Session::handle_key`], [`Session::handle_mouse`] and
//! [`Session::tick`]; [`Session::frame`] hands the renderer a view of it.

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use tracing::{debug, info};

use tetris3d_audio::{AudioBackend, MusicManager, SoundEffect};
use tetris3d_core::{Camera, GameSnapshot, GameState};
use tetris3d_input::{menu_action, music_action, play_action, should_quit};
use tetris3d_input::{CameraAction, MenuAction, MouseTracker, MusicAction};
use tetris3d_scores::HighScoreBook;
use tetris3d_term::{Frame, MusicStatus};
use tetris3d_types::{
    GameAction, LockEvent, Mode, CAMERA_DRAG_DEG_PER_CELL, LOADING_DURATION_MS,
    MENU_SPIN_DEG_PER_MS,
};

use crate::demo::DemoPlayer;

pub struct Session<B: AudioBackend = Box<dyn AudioBackend>> {
    mode: Mode,
    mode_elapsed_ms: u64,
    game: GameState,
    demo: DemoPlayer,
    camera: Camera,
    /// Menu auto-spin, degrees of extra yaw
    spin: f32,
    mouse: MouseTracker,
    scores: HighScoreBook,
    new_highscore: bool,
    music: MusicManager<B>,
    quit: bool,

    snapshot: GameSnapshot,
    music_title: Option<String>,
}

impl<B: AudioBackend> Session<B> {
    /// A session on the loading screen. Music starts right away.
    pub fn new(seed: u32, scores: HighScoreBook, music: MusicManager<B>) -> Self {
        let mut session = Self {
            mode: Mode::Loading,
            mode_elapsed_ms: 0,
            game: GameState::new(seed),
            demo: DemoPlayer::new(seed.rotate_left(16) ^ 0x5eed),
            camera: Camera::new(),
            spin: 0.0,
            mouse: MouseTracker::new(),
            scores,
            new_highscore: false,
            music,
            quit: false,
            snapshot: GameSnapshot::default(),
            music_title: None,
        };
        session.music.start();
        session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scores(&self) -> &HighScoreBook {
        &self.scores
    }

    pub fn music(&self) -> &MusicManager<B> {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicManager<B> {
        &mut self.music
    }

    pub fn new_highscore(&self) -> bool {
        self.new_highscore
    }

    pub fn mode_elapsed_ms(&self) -> u64 {
        self.mode_elapsed_ms
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        info!(from = self.mode.as_str(), to = mode.as_str(), "mode change");
        self.mode = mode;
        self.mode_elapsed_ms = 0;

        match mode {
            Mode::MainMenu => {
                self.game.reset();
                self.spin = 0.0;
            }
            Mode::GameOver => {
                let score = self.game.score();
                self.new_highscore = self.scores.record(score);
                info!(
                    score,
                    layers = self.game.layers(),
                    pieces = self.game.pieces(),
                    new_highscore = self.new_highscore,
                    "game over"
                );
            }
            Mode::Loading | Mode::Playing | Mode::Paused => {}
        }
    }

    fn start_game(&mut self) {
        self.game.restart();
        self.new_highscore = false;
        self.set_mode(Mode::Playing);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if should_quit(key) {
            info!("quit requested");
            self.quit = true;
            return;
        }
        if let Some(action) = music_action(key) {
            self.apply_music(action);
            return;
        }

        match self.mode {
            Mode::Loading => {
                if menu_action(key) == Some(MenuAction::Confirm) {
                    self.set_mode(Mode::MainMenu);
                }
            }
            Mode::MainMenu => match menu_action(key) {
                Some(MenuAction::Start) => self.start_game(),
                Some(MenuAction::Back) => {
                    info!("quit from menu");
                    self.quit = true;
                }
                _ => {}
            },
            Mode::Playing => {
                if menu_action(key) == Some(MenuAction::Back) {
                    self.set_mode(Mode::MainMenu);
                } else if let Some(action) = play_action(key) {
                    self.apply_play(action);
                }
            }
            Mode::Paused => {
                if play_action(key) == Some(GameAction::Pause) {
                    self.set_mode(Mode::Playing);
                } else if menu_action(key) == Some(MenuAction::Back) {
                    self.set_mode(Mode::MainMenu);
                }
            }
            Mode::GameOver => match menu_action(key) {
                Some(MenuAction::Restart) => self.start_game(),
                Some(MenuAction::Back) => self.set_mode(Mode::MainMenu),
                _ => {}
            },
        }
    }

    fn apply_play(&mut self, action: GameAction) {
        if action == GameAction::Pause {
            self.set_mode(Mode::Paused);
            return;
        }

        let changed = self.game.apply_action(action, &self.camera);
        if changed && action != GameAction::HardDrop {
            self.music.play_effect(SoundEffect::Click);
        }
        self.after_game_step();
    }

    fn apply_music(&mut self, action: MusicAction) {
        match action {
            MusicAction::ToggleMute => self.music.toggle_mute(),
            MusicAction::VolumeUp => self.music.volume_up(),
            MusicAction::VolumeDown => self.music.volume_down(),
            MusicAction::NextSong => self.music.next_song(),
        }
    }

    /// Sounds and logs for a lock, then the game-over check.
    fn after_game_step(&mut self) {
        if let Some(event) = self.game.take_last_event() {
            self.on_lock(event);
        }
        if self.game.game_over() {
            self.set_mode(Mode::GameOver);
        }
    }

    fn on_lock(&mut self, event: LockEvent) {
        debug!(
            piece = event.kind.as_str(),
            blocks = event.blocks,
            layers = event.layers_cleared,
            points = event.points,
            topped_out = event.topped_out,
            "piece locked"
        );
        self.music.play_effect(SoundEffect::Plop);
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let Some(action) = self.mouse.handle(event) else {
            return;
        };
        if !self.mode.shows_scene() {
            return;
        }
        match action {
            CameraAction::ZoomIn => self.camera.zoom_in(),
            CameraAction::ZoomOut => self.camera.zoom_out(),
            CameraAction::Orbit { dx, dy } => {
                self.camera
                    .orbit(dx as f32, dy as f32, CAMERA_DRAG_DEG_PER_CELL)
            }
        }
    }

    /// Advance the session by one timestep.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.mode_elapsed_ms += elapsed_ms as u64;
        self.music.update();

        match self.mode {
            Mode::Loading => {
                if self.mode_elapsed_ms >= LOADING_DURATION_MS as u64 {
                    self.set_mode(Mode::MainMenu);
                }
            }
            Mode::MainMenu => {
                self.spin = (self.spin + elapsed_ms as f32 * MENU_SPIN_DEG_PER_MS) % 360.0;
                self.demo.tick(&mut self.game, elapsed_ms);
            }
            Mode::Playing => {
                self.game.tick(elapsed_ms);
                self.after_game_step();
            }
            Mode::Paused | Mode::GameOver => {}
        }
    }

    /// Build the renderer's view of the current state.
    pub fn frame(&mut self) -> Frame<'_> {
        self.game.snapshot_into(&mut self.snapshot);
        self.music_title = self.music.current_title();

        Frame {
            mode: self.mode,
            snapshot: &self.snapshot,
            camera: self.camera,
            spin: if self.mode == Mode::MainMenu { self.spin } else { 0.0 },
            mode_elapsed_ms: self.mode_elapsed_ms,
            highscores: self.scores.entries(),
            new_highscore: self.new_highscore,
            music: MusicStatus {
                title: self.music_title.as_deref(),
                volume: self.music.volume(),
                muted: self.music.muted(),
            },
        }
    }
}
