use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use sotags_core::gateways::pacer::RequestPacer as _;
use sotags_db_sqlite::Connections;
use sotags_gateways::{pacer::SleepPacer, stackexchange::StackExchange};

mod config;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Popularity of the tags of a Stack Exchange site
struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of the SQLite database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Allow requests from the configured origins
        #[arg(long)]
        enable_cors: bool,
    },
    /// Fetch the most popular tags once and replace all stored tags
    Refresh {
        /// Lower bound for the number of tags to fetch
        #[arg(long, value_name = "N")]
        min_count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let Args {
        config: config_file,
        db_url,
        command,
    } = Args::parse();

    let mut cfg = config::Config::try_load_from_file_or_default(config_file)?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }

    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;

    sotags_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    match command.unwrap_or(Command::Serve { enable_cors: false }) {
        Command::Serve { enable_cors } => {
            let config::Config {
                webserver,
                ingestion,
                ..
            } = cfg;
            let web_cfg = sotags_webserver::Cfg {
                cors_allowed_origins: webserver.cors_allowed_origins,
                max_page_size: webserver.max_page_size,
                ingestion: ingestion.into(),
            };
            sotags_webserver::run(
                connections,
                enable_cors || webserver.enable_cors,
                web_cfg,
                env!("CARGO_PKG_VERSION"),
            )
            .await;
        }
        Command::Refresh { min_count } => {
            let mut ingestion = cfg.ingestion;
            if let Some(min_count) = min_count {
                ingestion.fetch_params.min_count = min_count;
            }
            let count = refresh(connections, ingestion).await?;
            log::info!("Stored {count} tags");
        }
    }
    Ok(())
}

/// Runs a single refresh that can be aborted with Ctrl-C between two pages.
async fn refresh(connections: Connections, ingestion: config::Ingestion) -> Result<usize> {
    let pacer = Arc::new(SleepPacer::new());
    let ctrl_c = tokio::spawn({
        let pacer = Arc::clone(&pacer);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupting ingestion");
                pacer.interrupt();
            }
        }
    });
    let config::Ingestion {
        api_base_url,
        site,
        timeout,
        fetch_params,
    } = ingestion;
    let result = tokio::task::spawn_blocking(move || -> Result<usize> {
        let source = StackExchange::try_new(&api_base_url, &site, timeout)?;
        let count = sotags_application::prelude::refresh_tags(
            &connections,
            &source,
            &*pacer,
            &fetch_params,
        )?;
        Ok(count)
    })
    .await;
    ctrl_c.abort();
    result?
}
