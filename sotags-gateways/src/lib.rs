//! Adapters for the external services that sotags depends on.

pub mod pacer;
pub mod stackexchange;
