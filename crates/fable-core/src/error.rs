use thiserror::Error;

#[derive(Debug, Error)]
pub enum FableError {
    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // Identity errors
    #[error("Nodes without an assigned id: {}", .0.join(", "))]
    UnassignedIdentity(Vec<String>),

    #[error("Duplicate node ids in graph: {}", .0.join(", "))]
    DuplicateNodeIds(Vec<String>),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FableError>;
