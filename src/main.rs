//! Leave Engine HTTP server.
//!
//! Environment:
//! - `LEAVE_ENGINE_CONFIG`: organization config directory (default `./config/org`)
//! - `LEAVE_ENGINE_ADDR`: bind address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_CONFIG_DIR: &str = "./config/org";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_dir = env::var("LEAVE_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("LEAVE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return Err(err.into());
        }
    };
    let policy = config.leave_pay_policy();
    info!(
        config_dir = %config_dir,
        services = config.services().len(),
        default_method = %policy.default_method,
        lookback_months = policy.lookback_months,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Leave Engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
