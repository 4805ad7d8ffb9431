use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("sotags.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub ingestion: Option<Ingestion>,
}

impl Config {
    pub fn try_default() -> Result<Self, toml::de::Error> {
        toml::from_str(DEFAULT_CONFIG_FILE)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    pub max_page_size: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ingestion {
    pub api_base_url: String,
    pub site: String,
    pub min_count: usize,
    pub page_size: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_delay: Duration,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}
