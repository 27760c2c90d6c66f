//! Runs the overdue sweep against a `PostgreSQL` task store.
//!
//! Usage:
//!
//! ```text
//! task_sweeper [config-path]
//! ```
//!
//! The optional JSON file at `config-path` is read as a
//! [`SweeperConfig`]; environment variables override its fields. Logging is
//! filtered by `TASKLANE_LOG` (default `tasklane=info,warn`) and formatted
//! according to `TASKLANE_LOG_FORMAT` (`compact` or `json`).
//!
//! The process sweeps once at start-up, then once per configured interval,
//! and exits cleanly on Ctrl-C.

use camino::Utf8PathBuf;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use tasklane::config::{ConfigError, ProcessEnv, SweeperConfig};
use tasklane::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    services::{SweepScheduler, TaskLifecycleService},
};
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILTER_ENV: &str = "TASKLANE_LOG";
const LOG_FORMAT_ENV: &str = "TASKLANE_LOG_FORMAT";
const DEFAULT_LOG_FILTER: &str = "tasklane=info,warn";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the sweeper before or while it runs.
#[derive(Debug, Error)]
enum SweeperError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    run().map_err(|err| {
        error!(error = %err, "task sweeper failed");
        err.into()
    })
}

fn run() -> Result<(), SweeperError> {
    let config_path = parse_args(env::args_os().skip(1))?;
    let config = SweeperConfig::load(config_path.as_deref(), &ProcessEnv)?;
    let pool = build_pool(&config)?;

    let service = TaskLifecycleService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let scheduler = SweepScheduler::new(service, config.sweep_interval());

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(SweeperError::RuntimeInit)?;
    runtime.block_on(async {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutdown requested"),
                Err(err) => error!(error = %err, "failed to listen for ctrl-c"),
            }
            shutdown_tx.send_replace(true);
        });
        scheduler.run(shutdown_rx).await;
    });
    Ok(())
}

fn parse_args(
    mut args: impl Iterator<Item = std::ffi::OsString>,
) -> Result<Option<Utf8PathBuf>, SweeperError> {
    let config_path = args
        .next()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map(Utf8PathBuf::from)
                .map_err(|_| SweeperError::InvalidArgs("config path is not valid UTF-8".into()))
        })
        .transpose()?;
    if let Some(extra) = args.next() {
        let extra_arg = extra.to_string_lossy();
        return Err(SweeperError::InvalidArgs(format!(
            "unexpected extra argument: {extra_arg}"
        )));
    }
    Ok(config_path)
}

fn build_pool(config: &SweeperConfig) -> Result<TaskPgPool, SweeperError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    Pool::builder()
        .max_size(config.pool_max_size)
        .build(manager)
        .map_err(SweeperError::Pool)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_owned());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => registry.with(fmt::layer().json().with_ansi(false)).init(),
        _ => registry.with(fmt::layer().compact()).init(),
    }
}
