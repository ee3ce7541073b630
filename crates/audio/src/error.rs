use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("no audio output device: {0}")]
    Stream(String),

    #[error("playback error: {0}")]
    Play(String),

    #[error("no music tracks in {dir}")]
    NoTracks { dir: String },
}

pub type Result<T> = std::result::Result<T, AudioError>;
