use crate::entities::TagCount;
use thiserror::Error;

/// A tag and its popularity as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTag {
    pub name: String,
    pub count: TagCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePage {
    /// Tags ordered by descending popularity.
    ///
    /// An empty page signals that the source has no more tags,
    /// as does `has_more == false`.
    Tags {
        items: Vec<SourceTag>,
        has_more: bool,
    },
    /// The source refuses to answer any more requests for now.
    RateLimited,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("The tag source is unreachable: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("The tag source responded with status {0}")]
    Status(u16),
    #[error("The tag source responded with a malformed payload: {0}")]
    Payload(#[source] anyhow::Error),
}

pub trait TagSource {
    /// Requests a single page of the most popular tags.
    ///
    /// Pages are numbered starting at 1.
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<SourcePage, Error>;
}
