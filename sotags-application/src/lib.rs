#[macro_use]
extern crate log;

mod query_tags;
mod refresh_tags;

pub mod prelude {
    pub use super::{query_tags::*, refresh_tags::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use sotags_core::{
    entities::*,
    gateways::{pacer::RequestPacer, tag_source::TagSource},
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use sotags_db_sqlite::Connections;
}
