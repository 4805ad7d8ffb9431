pub use sotags_boundary::*;

pub mod to_json {
    //! Entity -> JSON

    use super::*;
    use sotags_core::usecases::PagedTags;

    pub fn paged_tags(from: PagedTags) -> PagedResponse<TagView> {
        let PagedTags { items, total_count } = from;
        PagedResponse {
            total_count: total_count as u64,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
