use super::prelude::*;

/// Replaces all stored tags with the given tags.
///
/// Must be invoked within a transaction to guarantee that
/// readers never see a mixture of old and new tags.
pub fn refresh_tags<R: TagRepo>(repo: &R, tags: &[Tag]) -> Result<usize> {
    log::debug!("Replacing all stored tags with {} new tags", tags.len());
    let count = repo.replace_all_tags(tags)?;
    log::info!("Refreshed tags: {count} tags stored");
    Ok(count)
}
