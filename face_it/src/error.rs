use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("window: {0}")]
    Window(String),

    #[error("writing {path}: {source}")]
    Write {
        path:   PathBuf,
        source: std::io::Error,
    },
}
