use std::time::Duration;

use super::prelude::*;
use crate::tag::normalize_source_tag;

pub const DEFAULT_MIN_COUNT: usize = 1_000;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct FetchTagsParams {
    /// Lower bound for the number of tags to fetch.
    ///
    /// The last page is always taken as a whole, i.e.
    /// more tags might be returned.
    pub min_count: usize,
    pub page_size: u32,
    /// Delay before requesting the next page.
    pub request_delay: Duration,
}

impl Default for FetchTagsParams {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Fetches the most popular tags page by page.
///
/// Rate limiting and an exhausted source end the ingestion early
/// with all tags that have been collected so far.
pub fn fetch_tags(
    source: &dyn TagSource,
    pacer: &dyn RequestPacer,
    params: &FetchTagsParams,
) -> Result<Vec<Tag>> {
    let FetchTagsParams {
        min_count,
        page_size,
        request_delay,
    } = *params;
    let mut tags = Vec::new();
    let mut page = 1;
    // Pages that contributed tags
    let mut fetched_pages = 0;
    loop {
        if page > 1 {
            pacer.pause(request_delay)?;
        }
        log::debug!("Requesting page {page} with up to {page_size} tags");
        let (items, has_more) = match source.fetch_page(page, page_size) {
            Ok(SourcePage::Tags { items, has_more }) => (items, has_more),
            Ok(SourcePage::RateLimited) => {
                log::warn!(
                    "Rate limited while requesting page {page}: Stopping with {} tags",
                    tags.len()
                );
                break;
            }
            Err(err) => {
                log::warn!("Failed to fetch page {page} of tags: {err}");
                return Err(err.into());
            }
        };
        if items.is_empty() {
            log::info!("Page {page} contains no tags: Stopping with {} tags", tags.len());
            break;
        }
        fetched_pages += 1;
        let fetched_at = Timestamp::now();
        tags.extend(
            items
                .into_iter()
                .filter_map(|item| normalize_source_tag(item, fetched_at)),
        );
        if tags.len() >= min_count {
            break;
        }
        if !has_more {
            log::info!("No more tags after page {page}: Stopping with {} tags", tags.len());
            break;
        }
        page += 1;
    }
    log::info!("Fetched {} tags from {fetched_pages} page(s)", tags.len());
    Ok(tags)
}
