use anyhow::{Context, Result};
use apigateway::{config::Config, handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::utils::{Telemetry, init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("apigateway", config.otel_endpoint.clone());

    let logger_provider = telemetry.init_logger()?;
    telemetry.init_meter()?;
    telemetry.init_tracer()?;

    let _log_guard = init_logger(logger_provider, "apigateway", is_dev, is_enable_file);

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    info!("Server started successfully");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown().await?;

    Ok(())
}
