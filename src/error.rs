use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a file named '{0}' already exists")]
    AlreadyExists(String),
    #[error("no file named '{0}'")]
    NotFound(String),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
