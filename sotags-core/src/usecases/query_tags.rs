use super::prelude::*;
use crate::{
    tag::annotate_shares,
    util::sort::{SortOrder, SortTagViews as _, TagSortField},
};

pub const DEFAULT_TAGS_PER_PAGE: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
    /// Tags are returned in the order in which they
    /// have been stored if no sort field is given.
    pub sort_by: Option<TagSortField>,
    pub sort_order: SortOrder,
}

impl Default for TagQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_TAGS_PER_PAGE,
            sort_by: Some(TagSortField::Share),
            sort_order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedTags {
    pub items: Vec<TagView>,
    /// Number of all stored tags, regardless of pagination.
    pub total_count: usize,
}

pub fn query_tags<R: TagRepo>(repo: &R, query: &TagQuery) -> Result<PagedTags> {
    let TagQuery {
        page,
        page_size,
        sort_by,
        sort_order,
    } = *query;
    if page < 1 {
        return Err(Error::InvalidPage);
    }
    if page_size < 1 {
        return Err(Error::InvalidPageSize);
    }
    let records = repo.all_tags()?;
    let total_count = records.len();
    // Shares always refer to all tags, not only to the requested page
    let mut views = annotate_shares(records);
    if let Some(field) = sort_by {
        views.sort_by_field(field, sort_order);
    }
    let Pagination { offset, limit } = Pagination::from_page(page, page_size);
    let offset = offset.and_then(|o| usize::try_from(o).ok()).unwrap_or(usize::MAX);
    let limit = limit.and_then(|l| usize::try_from(l).ok()).unwrap_or(usize::MAX);
    let items = views.into_iter().skip(offset).take(limit).collect();
    Ok(PagedTags { items, total_count })
}
