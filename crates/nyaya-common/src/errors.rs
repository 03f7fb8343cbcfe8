use std::path::PathBuf;

use crate::id::SessionId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no session with id {0}")]
    NotFound(SessionId),

    #[error("persistence error: {0}")]
    Persistence(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NyayaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("{0}")]
    Other(String),
}
