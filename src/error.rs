use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Failed to load project config {path:?}: {source}")]
    ProjectConfig {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Previous iteration info not found at {path:?}, run the previous sampling iteration first")]
    MissingPreviousIteration { path: PathBuf },

    #[error("Failed to serialize params: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Invalid params file {path:?}: {source}")]
    ParamsFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ParamsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ParamsError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ParamsError>;
