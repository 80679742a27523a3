use thiserror::Error;

/// Infrastructure failures. Validation rejections are NOT errors —
/// they are [`crate::command::Rejection`] values and leave the game
/// state untouched.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
