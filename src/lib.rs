// Public modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod messages;
pub mod registry;
pub mod scheduler;
pub mod sensors;

// Re-export commonly used types
pub use config::{load_bus_config, load_sensor_config};
pub use errors::{SensorError, SensorResult};
pub use registry::init_all;
pub use scheduler::spawn_sensor_tasks;

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Run the Grove SensorHub with the given configuration directory
pub async fn run_hub(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[GroveSensorHub] starting up...");

    // Load configuration
    let sensor_config_path = format!("{}/sensors.toml", config_path);
    let sensor_config = load_sensor_config(&sensor_config_path)?;
    info!("[config] loaded {} sensor(s)", sensor_config.sensors.len());

    // Initialize sensors and buses
    let (sensors, buses) = init_all(&sensor_config, config_path).await?;
    info!("[registry] sensors and buses initialized");

    // Spawn sensor tasks
    spawn_sensor_tasks(sensors, buses, &sensor_config).await;
    info!("[main] sensor tasks launched");

    Ok(())
}
