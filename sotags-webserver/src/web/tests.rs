use std::{sync::Arc, time::Duration};

use rocket::{config::Config as RocketCfg, local::blocking::Client, Route};
use sotags_core::{
    entities::TagCount,
    gateways::tag_source::{self, SourcePage, SourceTag, TagSource},
    usecases::FetchTagsParams,
};
use sotags_gateways::pacer::SleepPacer;

use super::{sqlite, Cfg, Gateways, IngestionCfg, InstanceOptions};

pub mod prelude {

    pub const DUMMY_VERSION: &str = "3.2.1";

    pub use rocket::{
        http::{ContentType, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use super::{FakeSource, TestSetup};

    pub use sotags_core::{entities::*, repositories::*};
}

/// Serves prepared pages and fails with the given status afterwards.
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pages: Vec<SourcePage>,
    fail_with_status: Option<u16>,
}

impl FakeSource {
    pub fn with_tags(pages: &[&[(&str, TagCount)]]) -> Self {
        let pages = pages
            .iter()
            .enumerate()
            .map(|(i, tags)| SourcePage::Tags {
                items: tags
                    .iter()
                    .map(|(name, count)| SourceTag {
                        name: (*name).to_owned(),
                        count: *count,
                    })
                    .collect(),
                has_more: i + 1 < pages.len(),
            })
            .collect();
        Self {
            pages,
            fail_with_status: None,
        }
    }

    pub fn failing_after(mut self, status: u16) -> Self {
        // The last page must not stop the ingestion
        if let Some(SourcePage::Tags { has_more, .. }) = self.pages.last_mut() {
            *has_more = true;
        }
        self.fail_with_status = Some(status);
        self
    }
}

impl TagSource for FakeSource {
    fn fetch_page(&self, page: u32, _page_size: u32) -> Result<SourcePage, tag_source::Error> {
        if let Some(page) = self.pages.get(page as usize - 1) {
            return Ok(page.clone());
        }
        if let Some(status) = self.fail_with_status {
            return Err(tag_source::Error::Status(status));
        }
        Ok(SourcePage::Tags {
            items: vec![],
            has_more: false,
        })
    }
}

pub fn default_cfg() -> Cfg {
    Cfg {
        cors_allowed_origins: vec![],
        max_page_size: 100,
        ingestion: IngestionCfg {
            api_base_url: "http://localhost:0".into(),
            site: "stackoverflow".into(),
            timeout: None,
            fetch_params: FetchTagsParams {
                min_count: 1_000,
                page_size: 100,
                request_delay: Duration::ZERO,
            },
        },
    }
}

pub struct TestSetup {
    pub client: Client,
    pub db: sqlite::Connections,
    pub pacer: Arc<SleepPacer>,
}

pub fn rocket_test_setup(mounts: Vec<(&'static str, Vec<Route>)>, source: FakeSource) -> TestSetup {
    let connections = sotags_db_sqlite::Connections::init(":memory:", 1).unwrap();
    sotags_db_sqlite::run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    let db = sqlite::Connections::from(connections);
    let pacer = Arc::new(SleepPacer::new());
    let gateways = Gateways {
        tag_sources: Arc::new(move || Ok::<_, anyhow::Error>(Box::new(source.clone()) as Box<dyn TagSource>)),
        pacer: pacer.clone(),
    };
    let options = InstanceOptions {
        mounts,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg: default_cfg(),
        version: prelude::DUMMY_VERSION,
    };
    let rocket = super::rocket_instance(options, db.clone(), gateways);
    let client = Client::tracked(rocket).unwrap();
    TestSetup { client, db, pacer }
}
