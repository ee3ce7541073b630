//! Music directory scanning and no-repeat track selection.

use std::fs;
use std::path::{Path, PathBuf};

use tetris3d_core::SimpleRng;

use crate::error::{AudioError, Result};

/// File extensions recognised as music, matched case-insensitively.
pub const MUSIC_EXTENSIONS: [&str; 3] = ["mp3", "ogg", "wav"];

#[derive(Debug, Clone)]
pub struct Playlist {
    dir: PathBuf,
    /// Tracks played since the history last reset
    played: Vec<PathBuf>,
    rng: SimpleRng,
}

impl Playlist {
    pub fn new(dir: impl Into<PathBuf>, seed: u32) -> Self {
        Self {
            dir: dir.into(),
            played: Vec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn played(&self) -> &[PathBuf] {
        &self.played
    }

    /// List the music files, creating the directory when it is missing.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)?;

        let mut tracks = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && is_music_file(&path) {
                tracks.push(path);
            }
        }
        tracks.sort();
        Ok(tracks)
    }

    /// Choose a track that has not played since the last history reset.
    ///
    /// The directory is rescanned on every call, so files added while the
    /// game runs are picked up.
    pub fn pick(&mut self) -> Result<PathBuf> {
        let tracks = self.scan()?;
        if tracks.is_empty() {
            return Err(AudioError::NoTracks {
                dir: self.dir.display().to_string(),
            });
        }

        let mut available: Vec<&PathBuf> = tracks.iter().filter(|t| !self.played.contains(t)).collect();
        if available.is_empty() {
            self.played.clear();
            available = tracks.iter().collect();
        }

        let choice = match self.rng.choose(&available) {
            Some(&track) => track.clone(),
            None => return Err(AudioError::NoTracks { dir: self.dir.display().to_string() }),
        };
        self.played.push(choice.clone());
        Ok(choice)
    }
}

fn is_music_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MUSIC_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}
