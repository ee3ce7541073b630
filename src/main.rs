//! 3D Tetris runner (default binary).
//!
//! Fixed-timestep loop: render, poll input until the next tick, tick the
//! session. The terminal is restored on every exit path.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{error, info};

use tetris3d::app::{build_session, logging, Config, Session};
use tetris3d::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tetris3d::types::TICK_MS;

/// Static screens (pause, game over) redraw at most this often unless
/// something changes.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;

    let mut session = build_session(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);
    session.music_mut().stop();

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "game loop failed");
    }
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let mut view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_size = (0, 0);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            last_size = (w, h);
            term.invalidate();
            throttle.reset();
        }
        {
            let frame = session.frame();
            let now_ms = started.elapsed().as_millis() as u64;
            if throttle.should_render(now_ms, frame.fingerprint(), frame.is_static()) {
                view.render_into(&frame, Viewport::new(w, h), &mut fb);
                term.draw_swap(&mut fb)?;
            }
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => session.handle_key(key),
                Event::Mouse(mouse) => session.handle_mouse(mouse),
                Event::Resize(_, _) => throttle.reset(),
                _ => {}
            }
            if session.should_quit() {
                return Ok(());
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}
