use std::path::{Path, PathBuf};

use tetris3d_types::{MUSIC_VOLUME_DEFAULT, MUSIC_VOLUME_STEP};
use tracing::{debug, info, warn};

use crate::backend::AudioBackend;
use crate::error::{AudioError, Result};
use crate::playlist::Playlist;

/// Game sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A piece moved or rotated
    Click,
    /// A piece landed
    Plop,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Click, SoundEffect::Plop];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Click => "click.wav",
            SoundEffect::Plop => "plop.wav",
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::Click => 0,
            SoundEffect::Plop => 1,
        }
    }
}

/// Background music and sound effects with volume and mute.
///
/// Volume is a percentage (0..=100). Muting sets the output to zero but
/// keeps the volume, and volume changes while muted are silent until unmuted.
pub struct MusicManager<B: AudioBackend> {
    backend: B,
    playlist: Playlist,
    sounds_dir: PathBuf,
    volume: u8,
    muted: bool,
    current: Option<PathBuf>,
    /// Effects already reported missing
    missing_reported: [bool; 2],
}

impl<B: AudioBackend> MusicManager<B> {
    pub fn new(backend: B, songs_dir: impl Into<PathBuf>, sounds_dir: impl Into<PathBuf>, seed: u32) -> Self {
        Self {
            backend,
            playlist: Playlist::new(songs_dir, seed),
            sounds_dir: sounds_dir.into(),
            volume: MUSIC_VOLUME_DEFAULT,
            muted: false,
            current: None,
            missing_reported: [false; 2],
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Volume in percent, regardless of mute.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// The volume actually sent to the output (0.0..=1.0).
    pub fn output_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume as f32 / 100.0
        }
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Display name of the current track (file stem).
    pub fn current_title(&self) -> Option<String> {
        self.current
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.backend.set_music_volume(self.output_volume());
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
        info!(muted = self.muted, "music mute toggled");
    }

    pub fn volume_up(&mut self) {
        self.volume = self.volume.saturating_add(MUSIC_VOLUME_STEP).min(100);
        self.apply_volume();
    }

    pub fn volume_down(&mut self) {
        self.volume = self.volume.saturating_sub(MUSIC_VOLUME_STEP);
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        debug!(volume = self.volume, muted = self.muted, "music volume changed");
        if !self.muted {
            self.backend.set_music_volume(self.output_volume());
        }
    }

    /// Start playing if nothing is playing yet.
    pub fn start(&mut self) {
        if self.current.is_none() {
            self.next_song();
        }
    }

    /// Stop the current track and play another one.
    ///
    /// Failures are logged and leave the music stopped.
    pub fn next_song(&mut self) {
        self.backend.stop_music();
        self.current = None;
        match self.try_play_next() {
            Ok(track) => {
                info!(track = %track.display(), "now playing");
                self.current = Some(track);
            }
            Err(AudioError::NoTracks { dir }) => debug!(dir = %dir, "no music to play"),
            Err(e) => warn!(error = %e, "could not load music"),
        }
    }

    fn try_play_next(&mut self) -> Result<PathBuf> {
        let track = self.playlist.pick()?;
        self.backend.play_music(&track, self.output_volume())?;
        Ok(track)
    }

    /// Advance to another track once the current one ends.
    pub fn update(&mut self) {
        if self.current.is_some() && self.backend.music_finished() {
            self.next_song();
        }
    }

    /// Play an effect from the sounds directory; silent while muted.
    pub fn play_effect(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let path = self.sounds_dir.join(effect.file_name());
        if !path.is_file() {
            let reported = &mut self.missing_reported[effect.index()];
            if !*reported {
                *reported = true;
                warn!(path = %path.display(), "sound effect missing");
            }
            return;
        }
        if let Err(e) = self.backend.play_effect(&path) {
            warn!(path = %path.display(), error = %e, "could not play sound effect");
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop_music();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NullBackend;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        manager: MusicManager<NullBackend>,
    }

    fn fixture(songs: &[&str], sounds: &[&str]) -> Fixture {
        let root = TempDir::new().unwrap();
        let songs_dir = root.path().join("Songs");
        let sounds_dir = root.path().join("Sounds");
        fs::create_dir_all(&songs_dir).unwrap();
        fs::create_dir_all(&sounds_dir).unwrap();
        for name in songs {
            fs::write(songs_dir.join(name), b"").unwrap();
        }
        for name in sounds {
            fs::write(sounds_dir.join(name), b"").unwrap();
        }
        let manager = MusicManager::new(NullBackend::new(), songs_dir, sounds_dir, 5);
        Fixture { _root: root, manager }
    }

    #[test]
    fn test_volume_defaults_and_clamps() {
        let mut f = fixture(&[], &[]);
        let m = &mut f.manager;
        assert_eq!(m.volume(), 20);

        for _ in 0..20 {
            m.volume_up();
        }
        assert_eq!(m.volume(), 100);

        for _ in 0..20 {
            m.volume_down();
        }
        assert_eq!(m.volume(), 0);
    }

    #[test]
    fn test_mute_keeps_volume() {
        let mut f = fixture(&["a.mp3"], &[]);
        let m = &mut f.manager;
        m.start();
        assert!((m.backend().volume() - 0.2).abs() < 1e-6);

        m.toggle_mute();
        assert!(m.muted());
        assert_eq!(m.backend().volume(), 0.0);

        // Changes while muted stay silent.
        m.volume_up();
        assert_eq!(m.volume(), 30);
        assert_eq!(m.backend().volume(), 0.0);

        m.toggle_mute();
        assert!((m.backend().volume() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_start_and_auto_advance() {
        let mut f = fixture(&["a.mp3", "b.ogg"], &[]);
        let m = &mut f.manager;
        m.start();
        let first = m.current_track().unwrap().to_path_buf();
        assert_eq!(m.backend().track(), Some(first.as_path()));

        m.update();
        assert_eq!(m.current_track(), Some(first.as_path()));

        m.backend_mut().finish_track();
        m.update();
        let second = m.current_track().unwrap().to_path_buf();
        assert_ne!(first, second);
    }

    #[test]
    fn test_next_song_without_tracks() {
        let mut f = fixture(&[], &[]);
        let m = &mut f.manager;
        m.next_song();
        assert!(m.current_track().is_none());
        assert!(m.backend().track().is_none());
    }

    #[test]
    fn test_effects_respect_mute_and_missing_files() {
        let mut f = fixture(&[], &["click.wav"]);
        let m = &mut f.manager;

        m.play_effect(SoundEffect::Click);
        m.play_effect(SoundEffect::Plop); // missing: ignored
        assert_eq!(m.backend().effect_count(), 1);
        assert!(m.backend().last_effect().is_some_and(|p| p.ends_with("click.wav")));

        m.toggle_mute();
        m.play_effect(SoundEffect::Click);
        assert_eq!(m.backend().effect_count(), 1);
    }

    #[test]
    fn test_current_title() {
        let mut f = fixture(&["Neon Drive.mp3"], &[]);
        f.manager.start();
        assert_eq!(f.manager.current_title().as_deref(), Some("Neon Drive"));
    }
}
