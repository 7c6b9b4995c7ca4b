use grove_sensorhub::{init_tracing, run_hub};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // RUST_LOG=debug for verbose, RUST_LOG=info for normal, RUST_LOG=warn for production
    init_tracing();

    // Load configuration from CONFIG_PATH or default
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());

    if let Err(e) = run_hub(&config_path).await {
        error!("[main] startup failed: {}", e);
        std::process::exit(1);
    }

    info!("[main] running; press ctrl-c to stop");
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("[main] failed to listen for shutdown signal: {}", e);
    }
    info!("[main] shutting down");
}
