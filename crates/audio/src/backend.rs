//! Audio output backends.
//!
//! [`MusicManager`](crate::MusicManager) talks to an [`AudioBackend`]; the
//! real one uses `rodio` (feature `audio`), the null one keeps state only and
//! is used when there is no output device and in tests.

use std::path::{Path, PathBuf};

use crate::error::Result;

pub trait AudioBackend {
    /// Start a music track at `volume` (0.0..=1.0), replacing any current one.
    fn play_music(&mut self, path: &Path, volume: f32) -> Result<()>;

    fn stop_music(&mut self);

    fn set_music_volume(&mut self, volume: f32);

    /// True once the current track has played to the end.
    fn music_finished(&self) -> bool;

    /// Fire-and-forget sound effect.
    fn play_effect(&mut self, path: &Path) -> Result<()>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn play_music(&mut self, path: &Path, volume: f32) -> Result<()> {
        (**self).play_music(path, volume)
    }

    fn stop_music(&mut self) {
        (**self).stop_music()
    }

    fn set_music_volume(&mut self, volume: f32) {
        (**self).set_music_volume(volume)
    }

    fn music_finished(&self) -> bool {
        (**self).music_finished()
    }

    fn play_effect(&mut self, path: &Path) -> Result<()> {
        (**self).play_effect(path)
    }
}

/// Silent backend that tracks what would have played.
///
/// Effects are counted, and only the most recent path is kept.
#[derive(Debug, Clone, Default)]
pub struct NullBackend {
    track: Option<PathBuf>,
    volume: f32,
    finished: bool,
    effect_count: u64,
    last_effect: Option<PathBuf>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> Option<&Path> {
        self.track.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Number of effects played since creation.
    pub fn effect_count(&self) -> u64 {
        self.effect_count
    }

    pub fn last_effect(&self) -> Option<&Path> {
        self.last_effect.as_deref()
    }

    /// Pretend the current track reached its end.
    pub fn finish_track(&mut self) {
        if self.track.is_some() {
            self.finished = true;
        }
    }
}

impl AudioBackend for NullBackend {
    fn play_music(&mut self, path: &Path, volume: f32) -> Result<()> {
        self.track = Some(path.to_path_buf());
        self.volume = volume;
        self.finished = false;
        Ok(())
    }

    fn stop_music(&mut self) {
        self.track = None;
        self.finished = false;
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn music_finished(&self) -> bool {
        self.finished
    }

    fn play_effect(&mut self, path: &Path) -> Result<()> {
        self.effect_count += 1;
        self.last_effect = Some(path.to_path_buf());
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_backend::RodioBackend;

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    use super::AudioBackend;
    use crate::error::{AudioError, Result};

    /// Plays through the default output device.
    ///
    /// Each track gets its own `Sink`; effects are detached one-shot sinks.
    pub struct RodioBackend {
        // Dropping the stream stops all output.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
    }

    impl RodioBackend {
        pub fn new() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Stream(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn play_music(&mut self, path: &Path, volume: f32) -> Result<()> {
            self.stop_music();

            let file = BufReader::new(File::open(path)?);
            let source = Decoder::new(file).map_err(|e| AudioError::Decode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Play(e.to_string()))?;
            sink.set_volume(volume);
            sink.append(source);
            debug!(track = %path.display(), volume, "music started");
            self.music = Some(sink);
            Ok(())
        }

        fn stop_music(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }

        fn set_music_volume(&mut self, volume: f32) {
            if let Some(sink) = &self.music {
                sink.set_volume(volume);
            }
        }

        fn music_finished(&self) -> bool {
            self.music.as_ref().is_some_and(|sink| sink.empty())
        }

        fn play_effect(&mut self, path: &Path) -> Result<()> {
            let file = BufReader::new(File::open(path)?);
            let sink = self
                .handle
                .play_once(file)
                .map_err(|e| AudioError::Play(e.to_string()))?;
            sink.detach();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_backend_records_playback() {
        let mut backend = NullBackend::new();
        assert!(!backend.music_finished());

        backend.play_music(Path::new("Songs/a.mp3"), 0.2).unwrap();
        assert_eq!(backend.track(), Some(Path::new("Songs/a.mp3")));
        assert_eq!(backend.volume(), 0.2);

        backend.finish_track();
        assert!(backend.music_finished());

        backend.stop_music();
        assert!(backend.track().is_none());
        assert!(!backend.music_finished());
    }

    #[test]
    fn test_boxed_backend_forwards() {
        let mut backend: Box<dyn AudioBackend> = Box::new(NullBackend::new());
        backend.play_music(Path::new("x.ogg"), 0.5).unwrap();
        backend.play_effect(Path::new("click.wav")).unwrap();
        assert!(!backend.music_finished());
    }

    #[test]
    fn test_null_backend_keeps_only_last_effect() {
        let mut backend = NullBackend::new();
        assert_eq!(backend.effect_count(), 0);
        assert!(backend.last_effect().is_none());

        for _ in 0..100_000 {
            backend.play_effect(Path::new("Sounds/click.wav")).unwrap();
        }
        backend.play_effect(Path::new("Sounds/plop.wav")).unwrap();

        assert_eq!(backend.effect_count(), 100_001);
        assert_eq!(backend.last_effect(), Some(Path::new("Sounds/plop.wav")));
    }
}
