pub mod gateways;
pub mod repositories;
pub mod tag;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use sotags_entities::{tag::*, time::*};
}

pub use repositories::Error as RepoError;
