use crate::time::Timestamp;

/// Number of questions that are tagged with a tag.
pub type TagCount = u64;

/// Percentage of all tag occurrences, in the range `0.0..=100.0`.
pub type Share = f64;

/// Opaque identifier that is assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(i64);

impl From<i64> for TagId {
    fn from(from: i64) -> Self {
        Self(from)
    }
}

/// A tag with its popularity at the time it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub count: TagCount,
    pub fetched_at: Timestamp,
}

/// A stored tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: TagId,
    pub tag: Tag,
}

/// A tag annotated with its share of the occurrences of all tags.
///
/// Views are derived on demand and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TagView {
    pub name: String,
    pub count: TagCount,
    pub share: Share,
    pub fetched_at: Timestamp,
}
