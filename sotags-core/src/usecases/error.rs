use crate::{
    gateways::{pacer, tag_source},
    repositories,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid page number")]
    InvalidPage,
    #[error("Invalid page size")]
    InvalidPageSize,
    #[error("Failed to fetch tags: {0}")]
    Ingestion(#[from] tag_source::Error),
    #[error(transparent)]
    Interrupted(#[from] pacer::Interrupted),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
