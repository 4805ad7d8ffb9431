use sotags_core::{
    gateways::{pacer::Interrupted, tag_source},
    repositories::Error as RepoError,
    usecases::Error as ParameterError,
};
use thiserror::Error;

pub use sotags_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(ParameterError),
    #[error("Failed to fetch tags: {0}")]
    Ingestion(#[source] tag_source::Error),
    #[error(transparent)]
    Interrupted(Interrupted),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ParameterError> for BError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::Ingestion(err) => Self::Ingestion(err),
            ParameterError::Interrupted(err) => Self::Interrupted(err),
            ParameterError::Repo(err) => Self::Repo(err),
            err @ (ParameterError::InvalidPage | ParameterError::InvalidPageSize) => {
                Self::Parameter(err)
            }
        }
    }
}

impl From<String> for BError {
    fn from(s: String) -> Self {
        Self::Internal(s)
    }
}
