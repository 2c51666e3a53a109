use std::env;

use anyhow::Context;
use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/morocco";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading rate configuration from {}", config_dir))?;
    tracing::info!(
        config_dir = %config_dir,
        jurisdiction = %config.jurisdiction().code,
        rate_tables = config.config().rates().len(),
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "Payroll server listening");

    axum::serve(listener, create_router(AppState::new(config))).await?;
    Ok(())
}
