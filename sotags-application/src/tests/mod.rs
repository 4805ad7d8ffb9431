pub mod prelude {
    use std::{cell::RefCell, collections::VecDeque, time::Duration};

    pub use sotags_core::{
        entities::*,
        gateways::{
            pacer::{Interrupted, RequestPacer},
            tag_source::{self, SourcePage, SourceTag, TagSource},
        },
        repositories::*,
        usecases,
        util::sort::{SortOrder, TagSortField},
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    type SourceResponse = Result<SourcePage, tag_source::Error>;

    pub fn tags_page(tags: &[(&str, TagCount)], has_more: bool) -> SourceResponse {
        let items = tags
            .iter()
            .map(|(name, count)| SourceTag {
                name: (*name).to_owned(),
                count: *count,
            })
            .collect();
        Ok(SourcePage::Tags { items, has_more })
    }

    pub struct FakeSource {
        responses: RefCell<VecDeque<SourceResponse>>,
    }

    impl FakeSource {
        pub fn new(responses: Vec<SourceResponse>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    impl TagSource for FakeSource {
        fn fetch_page(&self, _page: u32, _page_size: u32) -> SourceResponse {
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| tags_page(&[], false))
        }
    }

    pub struct NoPacer;

    impl RequestPacer for NoPacer {
        fn pause(&self, _: Duration) -> Result<(), Interrupted> {
            Ok(())
        }
        fn interrupt(&self) {}
    }

    pub struct InterruptedPacer;

    impl RequestPacer for InterruptedPacer {
        fn pause(&self, _: Duration) -> Result<(), Interrupted> {
            Err(Interrupted)
        }
        fn interrupt(&self) {}
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            sotags_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self { db_connections }
        }

        pub fn store_tags(&self, tags: &[(&str, TagCount)]) {
            let tags: Vec<_> = tags
                .iter()
                .map(|(name, count)| Tag {
                    name: (*name).to_owned(),
                    count: *count,
                    fetched_at: Timestamp::now(),
                })
                .collect();
            let db = self.db_connections.exclusive().unwrap();
            db.replace_all_tags(&tags).unwrap();
        }

        pub fn stored_tag_names(&self) -> Vec<String> {
            self.db_connections
                .shared()
                .unwrap()
                .all_tags()
                .unwrap()
                .into_iter()
                .map(|r| r.tag.name)
                .collect()
        }
    }
}
