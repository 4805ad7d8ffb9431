use super::*;
use sotags_entities as e;

impl From<e::tag::TagView> for TagView {
    fn from(from: e::tag::TagView) -> Self {
        let e::tag::TagView {
            name,
            count,
            share,
            fetched_at,
        } = from;
        Self {
            name,
            count,
            share,
            fetched_at: fetched_at.into(),
        }
    }
}
