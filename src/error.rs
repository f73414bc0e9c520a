#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    InvalidFile(String),

    #[error("Corrupt data file: {0}")]
    CorruptStore(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
