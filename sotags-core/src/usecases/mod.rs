mod error;
mod fetch_tags;
mod query_tags;
mod refresh_tags;

#[cfg(test)]
pub mod tests;

pub use self::{error::Error, fetch_tags::*, query_tags::*, refresh_tags::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::{
            pacer::RequestPacer,
            tag_source::{SourcePage, TagSource},
        },
        repositories::{Pagination, TagRepo},
    };
}
