//! Marketplace entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::session_config::{BuildMode, session_settings_from_env};
use marketplace::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;

use server::{ServerConfig, ServerSettings, create_server};

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    let max_size = settings.db_max_connections()?;
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|err| io_error("migration task failed", err))?
        .map_err(|err| io_error("failed to run migrations", err))?;

    let config = PoolConfig::new(database_url).with_max_size(max_size);
    DbPool::new(config)
        .await
        .map_err(|err| io_error("failed to create database pool", err))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| io_error("invalid settings", err))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| io_error("invalid session configuration", err))?;

    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(database_url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "marketplace listening");
    server.await
}
