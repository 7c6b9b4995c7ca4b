use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;

/// Root configuration struct expecting `[[sensor]]` TOML array format
#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    #[serde(rename = "sensor")]
    pub sensors: Vec<SensorEntry>,
}

/// One sensor entry, matching each `[[sensor]]` section
///
/// The per-driver fields are optional; each driver validates what it needs
/// at creation time and falls back to its hardware defaults otherwise.
#[derive(Debug, Deserialize)]
pub struct SensorEntry {
    pub id: String,
    pub driver: String,
    pub bus: String,
    /// I2C slave address (register-bus drivers)
    pub address: Option<u8>,
    /// ADC reference voltage in volts (analog drivers)
    pub vref: Option<f32>,
    /// Number of at-rest samples averaged into the zero baseline
    pub calibration_samples: Option<u32>,
    pub frequency: Option<u32>,
}

/// Loads sensor config from TOML file
pub fn load_sensor_config(path: &str) -> ConfigResult<SensorConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Load {
        path: path.to_string(),
        source: e,
    })?;
    let parsed: SensorConfig = toml::from_str(&content)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sensor_entries() {
        let toml = r#"
            [[sensor]]
            id = "gyro0"
            driver = "enc03r"
            bus = "aio0"
            vref = 5.0
            calibration_samples = 50
            frequency = 100

            [[sensor]]
            id = "env0"
            driver = "th02"
            bus = "i2c1"
            address = 0x40
            frequency = 1
        "#;

        let cfg: SensorConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.sensors.len(), 2);

        let gyro = &cfg.sensors[0];
        assert_eq!(gyro.driver, "enc03r");
        assert_eq!(gyro.vref, Some(5.0));
        assert_eq!(gyro.calibration_samples, Some(50));
        assert_eq!(gyro.address, None);

        let env = &cfg.sensors[1];
        assert_eq!(env.driver, "th02");
        assert_eq!(env.address, Some(0x40));
        assert_eq!(env.frequency, Some(1));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(toml::from_str::<SensorConfig>("[[sensor]]\nid = 42").is_err());
    }
}
