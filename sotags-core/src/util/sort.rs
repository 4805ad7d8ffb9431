use std::{cmp::Ordering, str::FromStr};

use thiserror::Error;

use crate::entities::TagView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSortField {
    Name,
    Count,
    Share,
    FetchedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Error)]
#[error("Unknown sort field '{0}'")]
pub struct UnknownSortField(pub String);

#[derive(Debug, Error)]
#[error("Unknown sort order '{0}'")]
pub struct UnknownSortOrder(pub String);

impl FromStr for TagSortField {
    type Err = UnknownSortField;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.to_lowercase().as_str() {
            "name" => Self::Name,
            "count" => Self::Count,
            "share" => Self::Share,
            "fetchedat" | "fetched_at" | "fetched-at" => Self::FetchedAt,
            _ => return Err(UnknownSortField(s.to_owned())),
        };
        Ok(field)
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let order = match s.to_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => return Err(UnknownSortOrder(s.to_owned())),
        };
        Ok(order)
    }
}

pub trait SortTagViews {
    /// Stable sort, i.e. views with equal keys keep their relative order
    /// for both ascending and descending order.
    fn sort_by_field(&mut self, field: TagSortField, order: SortOrder);
}

impl SortTagViews for [TagView] {
    fn sort_by_field(&mut self, field: TagSortField, order: SortOrder) {
        match order {
            SortOrder::Asc => self.sort_by(|a, b| compare_by_field(a, b, field)),
            SortOrder::Desc => self.sort_by(|a, b| compare_by_field(b, a, field)),
        }
    }
}

fn compare_by_field(a: &TagView, b: &TagView, field: TagSortField) -> Ordering {
    match field {
        TagSortField::Name => a.name.cmp(&b.name),
        TagSortField::Count => a.count.cmp(&b.count),
        TagSortField::Share => a.share.total_cmp(&b.share),
        TagSortField::FetchedAt => a.fetched_at.cmp(&b.fetched_at),
    }
}
