use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by service operations, mapped onto HTTP statuses by the
/// route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("repository error: {0}")]
    Repository(RepositoryError),
    #[error("storage error: {0}")]
    Storage(StorageError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Not found".to_string()),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Repository(other),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidExtension | StorageError::FileTooLarge(_) => {
                Self::Unprocessable(err.to_string())
            }
            other => Self::Storage(other),
        }
    }
}
