//! Error type for the library surface.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A project configuration file could not be loaded.
    #[error("Cannot load custom tsconfig.json from provided path: {}, with error: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown format: {0}. Use json or markdown")]
    UnknownFormat(String),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Error::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
