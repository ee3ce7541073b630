//! GameView: maps a [`Frame`] (mode, snapshot, camera, HUD data) into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use tetris3d_scores::{format_score, HighScoreEntry};

use crate::core::{Camera, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::raster::{Canvas, Projection};
use crate::scene::{draw_piece_preview, draw_scene, BACKGROUND};
use crate::types::{Mode, GAME_OVER_HIGHSCORES, MAX_HIGHSCORES};

/// Title shown on the loading screen and the menu.
pub const TITLE: &str = "3D TETRIS";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Music state for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MusicStatus<'a> {
    pub title: Option<&'a str>,
    pub volume: u8,
    pub muted: bool,
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub mode: Mode,
    pub snapshot: &'a GameSnapshot,
    pub camera: Camera,
    /// Extra yaw for the menu auto-spin, degrees
    pub spin: f32,
    /// Milliseconds since the current mode was entered
    pub mode_elapsed_ms: u64,
    pub highscores: &'a [HighScoreEntry],
    pub new_highscore: bool,
    pub music: MusicStatus<'a>,
}

impl Frame<'_> {
    /// Screens that only change in response to input.
    pub fn is_static(&self) -> bool {
        matches!(self.mode, Mode::Paused | Mode::GameOver)
    }

    /// Hash of what a static frame shows, for redraw throttling.
    pub fn fingerprint(&self) -> u64 {
        let mut h = self.snapshot.fingerprint();
        let mix = |h: u64, v: u64| (h ^ v).wrapping_mul(0x100000001b3);
        h = mix(h, self.mode as u64);
        h = mix(h, self.music.volume as u64);
        h = mix(h, self.music.muted as u64);
        h = mix(h, self.new_highscore as u64);
        h = mix(h, self.camera.pitch().to_bits() as u64);
        h = mix(h, self.camera.yaw().to_bits() as u64);
        h = mix(h, self.camera.distance().to_bits() as u64);
        h = mix(h, self.highscores.len() as u64);
        if let Some(title) = self.music.title {
            for b in title.bytes() {
                h = mix(h, b as u64);
            }
        }
        h
    }
}

const TEXT: Rgb = Rgb::new(230, 230, 230);
const ACCENT: Rgb = Rgb::new(51, 204, 255);
const GOLD: Rgb = Rgb::new(255, 204, 51);
const YELLOW: Rgb = Rgb::new(255, 255, 0);
const RED: Rgb = Rgb::new(255, 51, 51);
const DIM: Rgb = Rgb::new(140, 140, 170);

const PREVIEW_COLS: u16 = 20;
const PREVIEW_ROWS: u16 = 8;

const CONTROLS_HINT: &str =
    "WASD move  Q/E rotate  R rotate Z  SPACE drop  P pause  M mute  6/7 volume  8 next song";

fn text(fg: Rgb) -> CellStyle {
    CellStyle::new(fg, BACKGROUND)
}

/// Terminal renderer for every screen of the game.
pub struct GameView {
    scene: Canvas,
    preview: Canvas,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        Self {
            scene: Canvas::new(0, 0),
            preview: Canvas::for_cells(PREVIEW_COLS, PREVIEW_ROWS),
        }
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; its allocation and
    /// the canvases' are only touched when the terminal size changes.
    pub fn render_into(&mut self, frame: &Frame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(text(TEXT).into_cell(' '));

        if frame.mode.shows_scene() {
            self.scene.resize_cells(viewport.width, viewport.height);
            let spin = if frame.mode == Mode::MainMenu { frame.spin } else { 0.0 };
            let proj = Projection::orbit(&frame.camera, spin);
            draw_scene(&mut self.scene, &proj, frame.snapshot, frame.snapshot.playable());
            self.scene.blit(fb, 0, 0);
        }

        match frame.mode {
            Mode::Loading => self.draw_loading(fb, frame),
            Mode::MainMenu => self.draw_menu(fb, frame),
            Mode::Playing => self.draw_hud(fb, frame),
            Mode::Paused => self.draw_paused(fb, frame),
            Mode::GameOver => self.draw_game_over(fb, frame),
        }
    }

    pub fn render(&mut self, frame: &Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_loading(&self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        let mid = fb.height() / 2;
        let t = frame.mode_elapsed_ms as f32;
        let pulse = Rgb::from_f32(
            (t * 0.005).sin().abs(),
            (t * 0.003 + 2.0).sin().abs(),
            (t * 0.004 + 4.0).sin().abs(),
        );
        fb.put_str_centered(mid.saturating_sub(2), TITLE, text(ACCENT).bold());
        fb.put_str_centered(mid, "LOADING...", text(pulse).bold());
        fb.put_str_centered(mid + 2, "Press ENTER to skip", text(TEXT));
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        let x = 4;
        fb.put_str(x, 2, TITLE, text(ACCENT).bold());
        fb.put_str(x, 4, "Press [S] to START", text(TEXT));
        fb.put_str(x, 5, "Press [ESC] to QUIT", text(TEXT));
        draw_highscores(fb, x, 7, frame.highscores, MAX_HIGHSCORES);
        self.draw_music(fb, frame);
    }

    fn draw_hud(&mut self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        draw_score(fb, frame.snapshot.score);

        let px = fb.width().saturating_sub(PREVIEW_COLS + 2);
        if px > 20 {
            if let Some(next) = &frame.snapshot.next {
                fb.put_str(px, 1, "NEXT", text(TEXT).bold());
                draw_piece_preview(&mut self.preview, next);
                self.preview.blit(fb, px, 2);
            }
            if let Some(last) = &frame.snapshot.last {
                let y = 3 + PREVIEW_ROWS;
                fb.put_str(px, y, "LAST", text(TEXT).bold());
                draw_piece_preview(&mut self.preview, last);
                self.preview.blit(fb, px, y + 1);
            }
        }

        let h = fb.height();
        fb.put_str(0, h.saturating_sub(1), CONTROLS_HINT, text(DIM));
        self.draw_music(fb, frame);
    }

    fn draw_paused(&self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        let mid = fb.height() / 2;
        draw_score(fb, frame.snapshot.score);
        fb.put_str_centered(mid.saturating_sub(1), "PAUSED", text(YELLOW).bold());
        fb.put_str_centered(mid + 1, "Press [P] to Resume   [ESC] to Quit to Menu", text(TEXT));
        self.draw_music(fb, frame);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        let top = (fb.height() / 2).saturating_sub(7);
        fb.put_str_centered(top, "GAME OVER", text(RED).bold());
        let score = format!("Your Score: {}", format_score(frame.snapshot.score));
        fb.put_str_centered(top + 2, &score, text(YELLOW));
        if frame.new_highscore {
            fb.put_str_centered(top + 3, "NEW HIGH SCORE!", text(GOLD).bold());
        }

        let x = fb.width().saturating_sub(36) / 2;
        let end = draw_highscores(fb, x, top + 5, frame.highscores, GAME_OVER_HIGHSCORES);
        fb.put_str_centered(end + 1, "[R] Restart   [ESC] Main Menu", text(TEXT));
    }

    fn draw_music(&self, fb: &mut FrameBuffer, frame: &Frame<'_>) {
        let music = &frame.music;
        let title = music.title.unwrap_or("no music");
        let status = if music.muted {
            format!("♪ {title}  MUTED")
        } else {
            format!("♪ {title}  VOL {}%", music.volume)
        };
        let row = match frame.mode {
            Mode::Playing => fb.height().saturating_sub(2),
            _ => fb.height().saturating_sub(1),
        };
        fb.put_str(0, row, &status, text(DIM));
    }
}

fn draw_score(fb: &mut FrameBuffer, score: u32) {
    fb.put_str(2, 1, &format!("SCORE: {score}"), text(ACCENT).bold());
}

/// Draw a "HIGH SCORES:" block; returns the row after it.
fn draw_highscores(fb: &mut FrameBuffer, x: u16, y: u16, entries: &[HighScoreEntry], limit: usize) -> u16 {
    fb.put_str(x, y, "HIGH SCORES:", text(GOLD).bold());
    let mut row = y + 1;
    if entries.is_empty() {
        fb.put_str(x, row, "No scores yet", text(DIM));
        return row + 1;
    }
    for (i, entry) in entries.iter().take(limit).enumerate() {
        let line = format!("{}. {} - {}", i + 1, format_score(entry.score), entry.date);
        fb.put_str(x, row, &line, text(TEXT));
        row += 1;
    }
    row
}
