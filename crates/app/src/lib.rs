//! Application layer: the mode state machine, the attract-mode demo and
//! process setup (configuration and logging).

pub mod config;
pub mod demo;
pub mod logging;
pub mod session;

pub use config::Config;
pub use demo::{DemoMove, DemoPlayer};
pub use session::Session;

use tetris3d_audio::{open_backend, MusicManager};
use tetris3d_scores::HighScoreBook;
use tracing::info;

/// Build a session from the configuration: load high scores and open the
/// audio output.
pub fn build_session(config: &Config) -> Session {
    let seed = config.seed();
    info!(
        seed,
        songs = %config.songs_dir.display(),
        highscores = %config.highscores.display(),
        "starting session"
    );

    let scores = HighScoreBook::load(&config.highscores);
    let mut music = MusicManager::new(open_backend(), &config.songs_dir, &config.sounds_dir, seed);
    music.set_muted(config.mute);
    Session::new(seed, scores, music)
}
