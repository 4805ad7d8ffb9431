// Low-level database access traits.
// The store keeps a single snapshot of tags that is
// replaced as a whole. There is no API for modifying
// individual tags.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    /// Pagination for 1-based page numbers.
    pub fn from_page(page: u64, page_size: u64) -> Self {
        debug_assert!(page > 0);
        Self {
            offset: Some(page.saturating_sub(1).saturating_mul(page_size)),
            limit: Some(page_size),
        }
    }
}

pub trait TagRepo {
    // All tags in the order in which they have been stored
    fn all_tags(&self) -> Result<Vec<TagRecord>>;

    // Removes all existing tags and stores the given tags instead.
    // Atomicity is only guaranteed when invoked within a transaction.
    fn replace_all_tags(&self, tags: &[Tag]) -> Result<usize>;
}
