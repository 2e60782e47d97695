use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChamberError {
    #[error("Index load failed: {0}")]
    IndexLoad(String),

    #[error("Session load failed for {file}: {reason}")]
    SessionLoad { file: String, reason: String },

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Unknown level key: {0}")]
    UnknownLevel(String),

    #[error("Invalid data path: {0}")]
    InvalidPath(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChamberError>;
