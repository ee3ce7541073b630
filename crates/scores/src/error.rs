use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score format error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
