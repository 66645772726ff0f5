use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Unknown file '{name}': {reason}")]
    UnknownFile { name: String, reason: String },

    #[error("Generation {timestamp} mixes full and incremental files, offending file '{name}'")]
    InconsistentGeneration { timestamp: i64, name: String },

    #[error("Directory not found: '{path}'")]
    InvalidDirectory { path: PathBuf },

    #[error("Failed to read directory '{path}': {cause}")]
    DirectoryRead { path: PathBuf, cause: walkdir::Error },

    #[error("Failed to read config file '{path}': {cause}")]
    ConfigRead { path: PathBuf, cause: io::Error },

    #[error("Failed to parse config file '{path}': {cause}")]
    ConfigParse {
        path: PathBuf,
        cause: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to copy file from '{from}' to '{to}': {cause}")]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        cause: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SelectError {
    pub fn unknown_file(name: &str, reason: impl Into<String>) -> Self {
        SelectError::UnknownFile {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectError>;
