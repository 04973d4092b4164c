//! Client error types

use std::io;

/// Client result type
pub type Result<T> = std::result::Result<T, Error>;

/// Client-layer errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] grimoire_core::Error),
}

impl Error {
    /// The refusal raised when a mutating action runs without a
    /// signed-in identity.
    pub fn not_signed_in() -> Self {
        grimoire_core::Error::Authorization("You must be signed in to do that".to_string()).into()
    }
}
