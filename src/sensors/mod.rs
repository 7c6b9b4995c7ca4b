#[cfg(feature = "enc03r")]
pub mod enc03r;
#[cfg(feature = "th02")]
pub mod th02;

use crate::bus::BusHandle;
use crate::config::sensor_config::SensorEntry;
use crate::errors::{SensorError, SensorResult};
use async_trait::async_trait;

/// One sample's worth of converted readings. Drivers fill in the
/// quantities they measure and leave the rest unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SensorDataFrame {
    /// Angular velocity about the sensing axis (deg/s)
    pub angular_velocity: Option<f32>,
    /// Ambient temperature (°C)
    pub temperature: Option<f32>,
    /// Relative humidity (%RH)
    pub humidity: Option<f32>,
}

#[async_trait]
pub trait SensorDriver: Send + Sync {
    async fn init(&mut self, bus: &mut BusHandle) -> SensorResult<()>;
    async fn sample(&self, bus: &mut BusHandle) -> SensorResult<SensorDataFrame>;
    fn id(&self) -> &str;
    fn bus(&self) -> &str;
}

pub trait SensorFactory: Sync {
    fn name(&self) -> &'static str;
    fn create(&self, entry: &SensorEntry) -> SensorResult<Box<dyn SensorDriver + Send>>;
}

#[cfg(feature = "enc03r")]
pub use self::enc03r::ENC03R_FACTORY;
#[cfg(feature = "th02")]
pub use self::th02::TH02_FACTORY;

pub static SENSOR_FACTORIES: &[&dyn SensorFactory] = &[
    #[cfg(feature = "enc03r")]
    &ENC03R_FACTORY,
    #[cfg(feature = "th02")]
    &TH02_FACTORY,
];

pub fn create_sensor_driver(entry: &SensorEntry) -> SensorResult<Box<dyn SensorDriver + Send>> {
    SENSOR_FACTORIES
        .iter()
        .find(|f| f.name() == entry.driver)
        .ok_or_else(|| SensorError::UnsupportedDriver {
            driver: entry.driver.clone(),
        })?
        .create(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(driver: &str) -> SensorEntry {
        SensorEntry {
            id: "test0".to_string(),
            driver: driver.to_string(),
            bus: "bus0".to_string(),
            address: None,
            vref: None,
            calibration_samples: None,
            frequency: None,
        }
    }

    #[test]
    fn unknown_driver_is_rejected() {
        let err = match create_sensor_driver(&entry("dht22")) {
            Ok(_) => panic!("expected UnsupportedDriver error"),
            Err(e) => e,
        };
        assert!(matches!(err, SensorError::UnsupportedDriver { driver } if driver == "dht22"));
    }

    #[cfg(feature = "enc03r")]
    #[test]
    fn enc03r_driver_is_registered() {
        let driver = create_sensor_driver(&entry("enc03r")).unwrap();
        assert_eq!(driver.id(), "test0");
        assert_eq!(driver.bus(), "bus0");
    }

    #[cfg(feature = "th02")]
    #[test]
    fn th02_driver_is_registered() {
        assert!(create_sensor_driver(&entry("th02")).is_ok());
    }
}
