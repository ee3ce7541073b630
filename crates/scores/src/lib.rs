//! High score table persisted as a JSON file.
//!
//! The file is a pretty-printed array of `{"score": n, "date": "YYYY-MM-DD HH:MM"}`
//! objects, highest score first, at most [`MAX_HIGHSCORES`] entries.
//! Loading never fails: a missing file is an empty table, and a broken one is
//! logged and treated as empty.

pub mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use error::{Result, ScoreError};
pub use tetris3d_types::MAX_HIGHSCORES;

/// Date format used for new entries.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct HighScoreBook {
    path: PathBuf,
    entries: Vec<HighScoreEntry>,
}

impl HighScoreBook {
    /// An empty book that saves to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the book from `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => {
                debug!(path = %path.display(), count = entries.len(), "loaded high scores");
                entries
            }
            Err(ScoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable high score file");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, highest first.
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// At most `n` entries from the top.
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would enter the table.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGHSCORES {
            return true;
        }
        self.entries
            .iter()
            .map(|e| e.score)
            .min()
            .is_some_and(|lowest| score > lowest)
    }

    /// Add a score if it qualifies, keeping the table sorted and bounded.
    ///
    /// Returns whether the score entered the table. A failed save is logged;
    /// the in-memory table is still updated.
    pub fn insert(&mut self, score: u32, date: impl Into<String>) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.entries.push(HighScoreEntry {
            score,
            date: date.into(),
        });
        // Stable: equal scores keep their insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGHSCORES);

        if let Err(e) = self.save() {
            warn!(path = %self.path.display(), error = %e, "failed to save high scores");
        }
        true
    }

    /// Insert `score` stamped with the current local time.
    pub fn record(&mut self, score: u32) -> bool {
        let date = chrono::Local::now().format(DATE_FORMAT).to_string();
        let added = self.insert(score, date);
        if added {
            info!(score, "new high score");
        }
        added
    }

    /// Write the table to disk.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Vec<HighScoreEntry>> {
    let text = fs::read_to_string(path)?;
    let mut entries: Vec<HighScoreEntry> = serde_json::from_str(&text)?;
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGHSCORES);
    Ok(entries)
}

/// Format a score with comma thousands separators (`12345` → `"12,345"`).
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
