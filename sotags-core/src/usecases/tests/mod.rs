use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    result,
    time::Duration,
};

use anyhow::anyhow;
use sotags_entities::builders::Builder as _;

use crate::{
    entities::*,
    gateways::{
        pacer::{Interrupted, RequestPacer},
        tag_source::{self, SourcePage, SourceTag, TagSource},
    },
    repositories::{Error as RepoError, *},
};

type RepoResult<T> = result::Result<T, RepoError>;

#[derive(Default)]
pub struct MockDb {
    pub tags: RefCell<Vec<TagRecord>>,
    next_id: Cell<i64>,
}

impl MockDb {
    pub fn with_tags(tags: &[(&str, TagCount)]) -> Self {
        let db = Self::default();
        let tags: Vec<_> = tags
            .iter()
            .map(|(name, count)| Tag::build().name(name).count(*count).finish())
            .collect();
        db.replace_all_tags(&tags).unwrap();
        db
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .borrow()
            .iter()
            .map(|r| r.tag.name.clone())
            .collect()
    }
}

impl TagRepo for MockDb {
    fn all_tags(&self) -> RepoResult<Vec<TagRecord>> {
        Ok(self.tags.borrow().clone())
    }
    fn replace_all_tags(&self, tags: &[Tag]) -> RepoResult<usize> {
        let records = tags
            .iter()
            .cloned()
            .map(|tag| {
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                TagRecord { id: id.into(), tag }
            })
            .collect();
        *self.tags.borrow_mut() = records;
        Ok(tags.len())
    }
}

pub struct BrokenDb;

impl TagRepo for BrokenDb {
    fn all_tags(&self) -> RepoResult<Vec<TagRecord>> {
        Err(anyhow!("disk on fire").into())
    }
    fn replace_all_tags(&self, _: &[Tag]) -> RepoResult<usize> {
        Err(anyhow!("disk on fire").into())
    }
}

type SourceResponse = result::Result<SourcePage, tag_source::Error>;

/// Replays prepared responses in order and records all requests.
pub struct ScriptedSource {
    responses: RefCell<VecDeque<SourceResponse>>,
    requests: RefCell<Vec<(u32, u32)>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = SourceResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            requests: Default::default(),
        }
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|(page, _)| *page).collect()
    }

    pub fn requested_page_sizes(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|(_, size)| *size).collect()
    }
}

impl TagSource for ScriptedSource {
    fn fetch_page(&self, page: u32, page_size: u32) -> SourceResponse {
        self.requests.borrow_mut().push((page, page_size));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected request for page {page}"))
    }
}

/// A page with `len` tags with descending counts.
pub fn page_of_tags(page: u32, len: usize, has_more: bool) -> SourceResponse {
    let items = (0..len)
        .map(|i| SourceTag {
            name: format!("tag-{page}-{i}"),
            count: 1_000_000 - (u64::from(page) * 1_000 + i as u64),
        })
        .collect();
    Ok(SourcePage::Tags { items, has_more })
}

pub fn empty_page() -> SourceResponse {
    Ok(SourcePage::Tags {
        items: vec![],
        has_more: false,
    })
}

/// Records all pauses without actually waiting.
#[derive(Default)]
pub struct RecordingPacer {
    pauses: RefCell<Vec<Duration>>,
    interrupted: Cell<bool>,
    max_pauses: Option<usize>,
}

impl RecordingPacer {
    /// A pacer that gets interrupted after the given number of pauses.
    pub fn interrupted_after(max_pauses: usize) -> Self {
        Self {
            max_pauses: Some(max_pauses),
            ..Default::default()
        }
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }
}

impl RequestPacer for RecordingPacer {
    fn pause(&self, delay: Duration) -> Result<(), Interrupted> {
        if let Some(max_pauses) = self.max_pauses {
            if self.pauses.borrow().len() >= max_pauses {
                self.interrupt();
            }
        }
        if self.interrupted.get() {
            return Err(Interrupted);
        }
        self.pauses.borrow_mut().push(delay);
        Ok(())
    }

    fn interrupt(&self) {
        self.interrupted.set(true);
    }
}
