//! The on-disk high score format.

use std::fs;

use serde_json::Value;
use tempfile::TempDir;

use tetris3d::scores::{HighScoreBook, HighScoreEntry};
use tetris3d::types::MAX_HIGHSCORES;

#[test]
fn test_reads_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("highscores.json");
    fs::write(
        &path,
        r#"[{"score": 2400, "date": "2024-02-01 20:15"}, {"score": 800, "date": "2024-02-02 08:00"}]"#,
    )
    .unwrap();

    let book = HighScoreBook::load(&path);
    assert_eq!(
        book.entries()[0],
        HighScoreEntry {
            score: 2400,
            date: "2024-02-01 20:15".to_string()
        }
    );
    assert!(book.qualifies(1));
}

#[test]
fn test_written_file_is_a_json_array_of_objects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("highscores.json");
    let mut book = HighScoreBook::load(&path);
    for score in 0..15u32 {
        book.insert(score * 10 + 1, "2024-02-01 20:15");
    }

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), MAX_HIGHSCORES);
    assert_eq!(entries[0]["score"], 141);
    assert_eq!(entries[0]["date"], "2024-02-01 20:15");
    assert_eq!(entries[0].as_object().unwrap().len(), 2);
}
