use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Row store error: {0}")]
    Backend(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
