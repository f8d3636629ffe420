use anyhow::Context;
use roster::domain::config::{ApiConfig, LogConfig};
use roster::kernel::config::{DEFAULT_FILE, ENV_PREFIX, load_config};
use roster_logger::{LevelFilter, Logger};
use roster_server::Server;
use std::str::FromStr;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some(DEFAULT_FILE)).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.log)?;
    info!(file = DEFAULT_FILE, env_prefix = ENV_PREFIX, "Configuration loaded");

    Server::builder().config(cfg).build().await?.run().await
}

fn init_logger(cfg: &LogConfig) -> anyhow::Result<Logger> {
    let level = LevelFilter::from_str(&cfg.level)
        .with_context(|| format!("Invalid log level '{}'", cfg.level))?;

    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &cfg.dir {
        Some(dir) => builder.path(dir).json(cfg.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
