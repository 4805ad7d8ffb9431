#![allow(proc_macro_derive_resolution_fallback)]

#[macro_use]
extern crate log;

use sotags_db_sqlite::Connections;

mod adapters;
mod web;

pub use web::{Cfg, IngestionCfg};

pub async fn run(connections: Connections, enable_cors: bool, cfg: Cfg, version: &'static str) {
    web::run(connections.into(), enable_cors, cfg, version).await;
}
