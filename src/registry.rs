use crate::bus::aio::AnalogInput;
use crate::bus::i2c::I2CBus;
use crate::bus::BusHandle;
use crate::config::load_bus_config;
use crate::config::sensor_config::SensorConfig;
use crate::errors::{RegistryError, RegistryResult, SensorError};
use crate::sensors::{create_sensor_driver, SensorDriver};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub type BusMap = HashMap<String, Arc<Mutex<BusHandle>>>;

/// Build all buses from `buses.toml` and all sensors from the sensor
/// config, running each driver's init against its bus.
pub async fn init_all(
    sensor_config: &SensorConfig,
    config_path: &str,
) -> RegistryResult<(Vec<Box<dyn SensorDriver>>, BusMap)> {
    let bus_config_path = format!("{}/buses.toml", config_path);
    let bus_cfg = load_bus_config(&bus_config_path)?;

    let mut bus_map = BusMap::new();
    for b in bus_cfg.buses.iter() {
        let handle = match b.r#type.as_str() {
            "i2c" => BusHandle::I2c(I2CBus::new(&b.path).map_err(|e| {
                RegistryError::BusOpen {
                    bus: b.id.clone(),
                    reason: e.to_string(),
                }
            })?),
            "aio" => BusHandle::Analog(AnalogInput::new(&b.path).map_err(|e| {
                RegistryError::BusOpen {
                    bus: b.id.clone(),
                    reason: e.to_string(),
                }
            })?),
            other => {
                warn!("[registry] skipping bus '{}' with unknown type '{}'", b.id, other);
                continue;
            }
        };
        info!("[registry] opened bus: id={} type={} path={}", b.id, b.r#type, b.path);
        bus_map.insert(b.id.clone(), Arc::new(Mutex::new(handle)));
    }

    let mut sensors: Vec<Box<dyn SensorDriver>> = Vec::new();
    info!("[registry] initializing {} sensor(s)...", sensor_config.sensors.len());
    for s in sensor_config.sensors.iter() {
        let mut sensor = create_sensor_driver(s).map_err(RegistryError::DriverCreation)?;
        info!(
            "[registry] registering sensor: id={} driver={} bus={}",
            s.id, s.driver, s.bus
        );

        let bus_arc = bus_map.get(&s.bus).ok_or_else(|| {
            RegistryError::DriverCreation(SensorError::BusNotFound { bus: s.bus.clone() })
        })?;
        let mut bus = bus_arc.lock().await;
        sensor
            .init(&mut bus)
            .await
            .map_err(RegistryError::Registration)?;
        sensors.push(sensor);
    }

    Ok((sensors, bus_map))
}
