use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(feature = "entity-conversions")]
mod conv;

/// A tag with its share of all tag occurrences in percent.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    pub name: String,
    pub count: u64,
    pub share: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    /// Number of all available items, independent of the page.
    pub total_count: u64,
    pub items: Vec<T>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct RefreshResponse {
    pub message: String,
    pub count: u64,
}

impl RefreshResponse {
    pub fn new(count: u64) -> Self {
        Self {
            message: format!("Refresh initiated for {count} tags."),
            count,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// The HTTP status code of the error
    pub http_status: u16,
    /// Error message
    pub message: String,
}
