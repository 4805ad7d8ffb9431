#![deny(missing_debug_implementations)]

//! # sotags-entities
//!
//! Reusable, agnostic domain entities for sotags.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod tag;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
