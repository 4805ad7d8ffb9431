pub mod pacer;
pub mod tag_source;
