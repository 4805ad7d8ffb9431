use std::sync::Arc;

use rocket::{response::status, tokio::task::spawn_blocking, FromForm};
use sotags_core::{
    usecases::{TagQuery, DEFAULT_TAGS_PER_PAGE},
    util::sort::{SortOrder, TagSortField},
};

use super::*;

const MAX_PAGE: u64 = i32::MAX as u64;

/// Raw query parameters
///
/// All values are parsed and validated manually to
/// respond with meaningful error messages.
#[derive(Debug, Default, FromForm)]
pub struct TagsQuery {
    #[field(name = uncased("page"))]
    page: Option<String>,
    #[field(name = uncased("pageSize"))]
    page_size: Option<String>,
    #[field(name = uncased("sortBy"))]
    sort_by: Option<String>,
    #[field(name = uncased("sortOrder"))]
    sort_order: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bounded(
    field: &str,
    value: Option<String>,
    default: u64,
    max: u64,
) -> result::Result<u64, ApiError> {
    let Some(value) = non_blank(value) else {
        return Ok(default);
    };
    let number = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("The value '{value}' is not valid for {field}.")))?;
    u64::try_from(number)
        .ok()
        .filter(|n| (1..=max).contains(n))
        .ok_or_else(|| ApiError::bad_request(format!("The field {field} must be between 1 and {max}")))
}

impl TagsQuery {
    pub fn try_into_tag_query(self, max_page_size: u64) -> result::Result<TagQuery, ApiError> {
        let Self {
            page,
            page_size,
            sort_by,
            sort_order,
        } = self;
        let page = parse_bounded("page", page, 1, MAX_PAGE)?;
        let page_size = parse_bounded(
            "pageSize",
            page_size,
            DEFAULT_TAGS_PER_PAGE.min(max_page_size),
            max_page_size,
        )?;
        let sort_by = non_blank(sort_by)
            .map(|s| s.trim().parse::<TagSortField>())
            .transpose()
            .map_err(|err| ApiError::bad_request(format!("{err} for sortBy")))?
            .unwrap_or(TagSortField::Share);
        let sort_order = non_blank(sort_order)
            .map(|s| s.trim().parse::<SortOrder>())
            .transpose()
            .map_err(|err| ApiError::bad_request(format!("{err} for sortOrder")))?
            .unwrap_or_default();
        Ok(TagQuery {
            page,
            page_size,
            sort_by: Some(sort_by),
            sort_order,
        })
    }
}

#[get("/tags?<query..>")]
pub fn get_tags(
    connections: sqlite::Connections,
    cfg: &State<Cfg>,
    query: TagsQuery,
) -> Result<json::PagedResponse<json::TagView>> {
    let query = query.try_into_tag_query(cfg.max_page_size)?;
    let paged = flows::query_tags(&connections, &query)?;
    Ok(Json(to_json::paged_tags(paged)))
}

#[post("/tags/refresh")]
pub async fn post_tags_refresh(
    connections: sqlite::Connections,
    tag_sources: &State<TagSources>,
    pacer: &State<Pacer>,
    cfg: &State<Cfg>,
) -> result::Result<status::Accepted<Json<json::RefreshResponse>>, ApiError> {
    let new_tag_source = Arc::clone(&tag_sources.0);
    let pacer = Arc::clone(&pacer.0);
    let params = cfg.ingestion.fetch_params.clone();
    let count = spawn_blocking(move || {
        let source = new_tag_source()?;
        flows::refresh_tags(&connections, &*source, &*pacer, &params)
    })
    .await??;
    Ok(status::Accepted(Json(json::RefreshResponse::new(count as u64))))
}
