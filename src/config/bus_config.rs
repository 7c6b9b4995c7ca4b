use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;

/// Root configuration struct expecting `[[bus]]` TOML array format
#[derive(Debug, Deserialize)]
pub struct BusConfig {
    #[serde(rename = "bus")]
    pub buses: Vec<BusEntry>,
}

/// One bus entry, matching each `[[bus]]` section
///
/// `type` selects the transport: "i2c" for an i2cdev character device,
/// "aio" for an IIO sysfs voltage attribute.
#[derive(Debug, Deserialize)]
pub struct BusEntry {
    pub id: String,
    pub r#type: String,
    pub path: String,
}

/// Loads bus config from TOML file
pub fn load_bus_config(path: &str) -> ConfigResult<BusConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Load {
        path: path.to_string(),
        source: e,
    })?;
    let parsed: BusConfig = toml::from_str(&content)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bus_entries() {
        let toml = r#"
            [[bus]]
            id = "i2c1"
            type = "i2c"
            path = "/dev/i2c-1"

            [[bus]]
            id = "aio0"
            type = "aio"
            path = "/sys/bus/iio/devices/iio:device0/in_voltage0_raw"
        "#;

        let cfg: BusConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.buses.len(), 2);
        assert_eq!(cfg.buses[0].id, "i2c1");
        assert_eq!(cfg.buses[0].r#type, "i2c");
        assert_eq!(cfg.buses[1].path, "/sys/bus/iio/devices/iio:device0/in_voltage0_raw");
    }
}
