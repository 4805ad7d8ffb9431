use super::*;

pub fn query_tags(
    connections: &sqlite::Connections,
    query: &usecases::TagQuery,
) -> Result<usecases::PagedTags> {
    let db = connections.shared()?;
    Ok(usecases::query_tags(&db, query)?)
}
