//! Backend entry-point: loads configuration, initialises logging, and serves
//! the versioned HTTP API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use api_backend::inbound::http::health::HealthState;
use api_backend::settings::VersioningSettings;
use server::{ServerConfig, create_server};

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

    let config = load_config().inspect_err(|err| error!(error = %err, "invalid configuration"))?;
    info!(bind_addr = %config.bind_addr(), "starting api backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .inspect_err(|err| error!(error = %err, "failed to start HTTP server"))?;
    server.await
}

fn load_config() -> std::io::Result<ServerConfig> {
    let versioning = VersioningSettings::load_from_iter(std::env::args_os().take(1))
        .map_err(|err| std::io::Error::other(format!("versioning settings: {err}")))?
        .into_policy()
        .map_err(std::io::Error::other)?;
    let config = ServerConfig::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    Ok(config.with_versioning(versioning))
}
