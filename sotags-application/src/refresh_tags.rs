use super::*;

fn fetch_tags(
    source: &dyn TagSource,
    pacer: &dyn RequestPacer,
    params: &usecases::FetchTagsParams,
) -> Result<Vec<Tag>> {
    info!(
        "Fetching at least {} tags with a delay of {:?} between requests",
        params.min_count, params.request_delay
    );
    Ok(usecases::fetch_tags(source, pacer, params).map_err(|err| {
        warn!("Failed to fetch tags: {}", err);
        err
    })?)
}

fn exec_refresh_tags(connections: &sqlite::Connections, tags: &[Tag]) -> Result<usize> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::refresh_tags(conn, tags).map_err(|err| {
            warn!("Failed to replace all tags with {} new tags: {}", tags.len(), err);
            err
        })
    })?)
}

/// Fetches the most popular tags and replaces all stored tags.
///
/// The stored tags are only touched after all tags
/// have been fetched successfully.
pub fn refresh_tags(
    connections: &sqlite::Connections,
    source: &dyn TagSource,
    pacer: &dyn RequestPacer,
    params: &usecases::FetchTagsParams,
) -> Result<usize> {
    let tags = fetch_tags(source, pacer, params)?;
    exec_refresh_tags(connections, &tags)
}
