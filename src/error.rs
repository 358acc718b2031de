//! Error types for the collaborators around the game core.
//!
//! The simulation itself never fails; only config loading, highscore
//! persistence and audio playback return these.

/// Error type for config, persistence and audio operations
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// IO error from the filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a config or highscore file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config values that cannot drive a session
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Audio playback rejected by the sink
    #[error("Audio error: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
