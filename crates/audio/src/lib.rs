//! Music and sound effects.
//!
//! Plays background music from a songs directory and short effects from a
//! sounds directory. Output goes through `rodio` when the `audio` feature is
//! enabled and an output device exists; otherwise a silent backend keeps the
//! same state so the game behaves identically.
//!
//! # Architecture
//!
//! - [`MusicManager`] - volume, mute, track changes and effects
//! - [`Playlist`] - directory scan and no-repeat random choice
//! - [`AudioBackend`] - output seam ([`NullBackend`], `RodioBackend`)
//!
//! # Example
//!
//! ```
//! use tetris3d_audio::{MusicManager, NullBackend, SoundEffect};
//!
//! let mut music = MusicManager::new(NullBackend::new(), "Songs", "Sounds", 1);
//! music.volume_up();
//! assert_eq!(music.volume(), 30);
//! music.toggle_mute();
//! music.play_effect(SoundEffect::Click); // silent while muted
//! ```

pub mod backend;
pub mod error;
mod manager;
pub mod playlist;

pub use backend::{AudioBackend, NullBackend};
#[cfg(feature = "audio")]
pub use backend::RodioBackend;
pub use error::{AudioError, Result};
pub use manager::{MusicManager, SoundEffect};
pub use playlist::{Playlist, MUSIC_EXTENSIONS};

/// Open the best available output: `rodio` when compiled in and a device
/// exists, otherwise the silent backend.
pub fn open_backend() -> Box<dyn AudioBackend> {
    #[cfg(feature = "audio")]
    {
        match RodioBackend::new() {
            Ok(backend) => return Box::new(backend),
            Err(e) => tracing::warn!(error = %e, "audio output unavailable, continuing silently"),
        }
    }
    Box::new(NullBackend::new())
}
