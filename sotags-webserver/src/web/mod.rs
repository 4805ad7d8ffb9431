use std::{sync::Arc, time::Duration};

use rocket::{
    config::Config as RocketCfg,
    fairing::AdHoc,
    http::Method,
    Rocket, Route,
};
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use sotags_core::{
    gateways::{pacer::RequestPacer, tag_source::TagSource},
    usecases::FetchTagsParams,
};
use sotags_gateways::{pacer::SleepPacer, stackexchange::StackExchange};

pub mod api;
mod guards;
mod sqlite;

#[cfg(test)]
pub mod tests;

#[derive(Debug, Clone)]
pub struct Cfg {
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound for the requested number of tags per page
    pub max_page_size: u64,
    pub ingestion: IngestionCfg,
}

#[derive(Debug, Clone)]
pub struct IngestionCfg {
    pub api_base_url: String,
    pub site: String,
    pub timeout: Option<Duration>,
    pub fetch_params: FetchTagsParams,
}

/// Creates a new tag source for each refresh.
///
/// The source is created and dropped on a blocking worker thread.
pub(crate) type TagSourceFactory =
    Arc<dyn Fn() -> anyhow::Result<Box<dyn TagSource>> + Send + Sync>;

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    tag_sources: TagSourceFactory,
    pacer: Arc<dyn RequestPacer + Send + Sync>,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways { tag_sources, pacer } = gateways;

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let tag_sources = guards::TagSources(tag_sources);
    let pacer = guards::Pacer(pacer);
    let version = guards::Version(version);

    let mut instance = r
        .manage(db)
        .manage(tag_sources)
        .manage(pacer)
        .manage(cfg)
        .manage(version)
        .attach(AdHoc::on_shutdown("Interrupt ingestion", |rocket| {
            Box::pin(async move {
                if let Some(pacer) = rocket.state::<guards::Pacer>() {
                    info!("Interrupting any running ingestion");
                    pacer.interrupt();
                }
            })
        }));

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

fn stackexchange_tag_sources(cfg: &IngestionCfg) -> TagSourceFactory {
    let IngestionCfg {
        api_base_url,
        site,
        timeout,
        ..
    } = cfg.clone();
    Arc::new(move || -> anyhow::Result<Box<dyn TagSource>> {
        let source = StackExchange::try_new(&api_base_url, &site, timeout)?;
        Ok(Box::new(source) as Box<dyn TagSource>)
    })
}

fn cors_options(allowed_origins: &[String]) -> CorsOptions {
    CorsOptions {
        allowed_origins: AllowedOrigins::some_exact(allowed_origins),
        allowed_methods: vec![Method::Get, Method::Post]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::all(),
        ..Default::default()
    }
}

pub async fn run(db: sqlite::Connections, enable_cors: bool, cfg: Cfg, version: &'static str) {
    let gateways = Gateways {
        tag_sources: stackexchange_tag_sources(&cfg.ingestion),
        pacer: Arc::new(SleepPacer::new()),
    };
    let cors = if enable_cors {
        match cors_options(&cfg.cors_allowed_origins).to_cors() {
            Ok(cors) => Some(cors),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        None
    };
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = rocket_instance(options, db, gateways);
    let server_task = if let Some(cors) = cors {
        instance.attach(cors).launch()
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
