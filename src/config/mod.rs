use anyhow::{anyhow, Result};
use sotags_core::usecases::FetchTagsParams;
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "sotags.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

// Clients never get more tags per page
const UPPER_LIMIT_MAX_PAGE_SIZE: u64 = 100;

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub ingestion: Ingestion,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::try_default()?
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub cors_allowed_origins: Vec<String>,
    pub max_page_size: u64,
}

#[derive(Clone)]
pub struct Ingestion {
    pub api_base_url: String,
    pub site: String,
    pub timeout: Option<Duration>,
    pub fetch_params: FetchTagsParams,
}

impl From<Ingestion> for sotags_webserver::IngestionCfg {
    fn from(from: Ingestion) -> Self {
        let Ingestion {
            api_base_url,
            site,
            timeout,
            fetch_params,
        } = from;
        Self {
            api_base_url,
            site,
            timeout,
            fetch_params,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            ingestion,
        } = from;

        // Missing sections are taken from the embedded defaults
        let defaults = raw::Config::try_default()?;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db
            .or(defaults.db)
            .ok_or_else(|| anyhow!("Missing DB configuration"))?;

        if connection_pool_size == 0 {
            return Err(anyhow!("The DB connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            cors,
            cors_allowed_origins,
            max_page_size,
        } = webserver
            .or(defaults.webserver)
            .ok_or_else(|| anyhow!("Missing webserver configuration"))?;

        if !(1..=UPPER_LIMIT_MAX_PAGE_SIZE).contains(&max_page_size) {
            return Err(anyhow!(
                "The max. page size must be between 1 and {UPPER_LIMIT_MAX_PAGE_SIZE}: {max_page_size}"
            ));
        }
        let webserver = WebServer {
            enable_cors: cors,
            cors_allowed_origins,
            max_page_size,
        };

        let raw::Ingestion {
            api_base_url,
            site,
            min_count,
            page_size,
            request_delay,
            timeout,
        } = ingestion
            .or(defaults.ingestion)
            .ok_or_else(|| anyhow!("Missing ingestion configuration"))?;

        if page_size == 0 {
            return Err(anyhow!("The ingestion page size must be at least 1"));
        }
        let ingestion = Ingestion {
            api_base_url,
            site,
            timeout,
            fetch_params: FetchTagsParams {
                min_count,
                page_size,
                request_delay,
            },
        };

        Ok(Self {
            db,
            webserver,
            ingestion,
        })
    }
}
