use std::time::Duration;

use anyhow::Result as Fallible;
use reqwest::{blocking::Client, StatusCode, Url};
use serde::Deserialize;
use sotags_core::{
    entities::TagCount,
    gateways::tag_source::{Error, SourcePage, SourceTag, TagSource},
};

const USER_AGENT: &str = concat!("sotags/", env!("CARGO_PKG_VERSION"));

/// Fetches the most popular tags of a Stack Exchange site.
#[derive(Debug, Clone)]
pub struct StackExchange {
    tags_url: Url,
    site: String,
    client: Client,
}

impl StackExchange {
    pub fn try_new(api_base_url: &str, site: &str, timeout: Option<Duration>) -> Fallible<Self> {
        let tags_url = Url::parse(&format!("{}/tags", api_base_url.trim_end_matches('/')))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            tags_url,
            site: site.to_owned(),
            client,
        })
    }

    fn page_url(&self, page: u32, page_size: u32) -> Url {
        let mut url = self.tags_url.clone();
        url.query_pairs_mut()
            .append_pair("order", "desc")
            .append_pair("sort", "popular")
            .append_pair("site", &self.site)
            .append_pair("page", &page.to_string())
            .append_pair("pagesize", &page_size.to_string());
        url
    }
}

impl TagSource for StackExchange {
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<SourcePage, Error> {
        let url = self.page_url(page, page_size);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| Error::Transport(err.into()))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|err| Error::Transport(err.into()))?;
        parse_tags_response(status, &body)
    }
}

/// Common wrapper of all Stack Exchange API responses.
#[derive(Debug, Deserialize)]
struct Envelope {
    items: Option<Vec<TagItem>>,
    #[serde(default)]
    has_more: bool,
    backoff: Option<u64>,
    quota_remaining: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TagItem {
    #[serde(default)]
    name: String,
    count: TagCount,
}

fn parse_tags_response(status: StatusCode, body: &[u8]) -> Result<SourcePage, Error> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Ok(SourcePage::RateLimited);
    }
    if !status.is_success() {
        return Err(Error::Status(status.as_u16()));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SourcePage::Tags {
            items: vec![],
            has_more: false,
        });
    }
    let envelope: Option<Envelope> =
        serde_json::from_slice(body).map_err(|err| Error::Payload(err.into()))?;
    let Some(Envelope {
        items,
        has_more,
        backoff,
        quota_remaining,
    }) = envelope
    else {
        return Ok(SourcePage::Tags {
            items: vec![],
            has_more: false,
        });
    };
    let mut has_more = has_more;
    if let Some(seconds) = backoff {
        log::warn!("Requested to back off for {seconds} second(s) before the next request");
        has_more = false;
    }
    if quota_remaining == Some(0) {
        log::warn!("Request quota exhausted");
        has_more = false;
    }
    let items = items
        .unwrap_or_default()
        .into_iter()
        .map(|TagItem { name, count }| SourceTag { name, count })
        .collect();
    Ok(SourcePage::Tags { items, has_more })
}
