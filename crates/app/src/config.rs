use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

/// Command line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "tetris3d")]
#[command(about = "3D Tetris in the terminal", version)]
pub struct Config {
    /// Directory scanned for background music (mp3, ogg, wav)
    #[arg(long, env = "TETRIS3D_SONGS_DIR", default_value = "Songs")]
    pub songs_dir: PathBuf,

    /// Directory holding click.wav and plop.wav
    #[arg(long, env = "TETRIS3D_SOUNDS_DIR", default_value = "Sounds")]
    pub sounds_dir: PathBuf,

    /// High score file
    #[arg(long, env = "TETRIS3D_HIGHSCORES", default_value = "highscores.json")]
    pub highscores: PathBuf,

    /// Write logs to this file (logging is off without it)
    #[arg(long, env = "TETRIS3D_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Seed for the piece bag, the demo and the playlist
    #[arg(long, env = "TETRIS3D_SEED")]
    pub seed: Option<u32>,

    /// Start with the music muted
    #[arg(long, env = "TETRIS3D_MUTE")]
    pub mute: bool,
}

impl Config {
    /// The configured seed, or one derived from the clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["tetris3d"]).unwrap();
        assert_eq!(config.highscores, PathBuf::from("highscores.json"));
        assert!(config.log_file.is_none());
        assert!(!config.mute);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "tetris3d",
            "--songs-dir",
            "/tmp/music",
            "--seed",
            "42",
            "--mute",
        ])
        .unwrap();
        assert_eq!(config.songs_dir, PathBuf::from("/tmp/music"));
        assert_eq!(config.seed(), 42);
        assert!(config.mute);
    }
}
