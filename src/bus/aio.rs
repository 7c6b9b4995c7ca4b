use crate::errors::{SensorError, SensorResult};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Analog input channel backed by a Linux IIO sysfs attribute.
///
/// The kernel exposes each ADC channel as a text attribute (e.g.
/// `/sys/bus/iio/devices/iio:device0/in_voltage0_raw`) containing the
/// current raw conversion count.
pub struct AnalogInput {
    path: PathBuf,
}

impl AnalogInput {
    /// Open an analog channel. Fails if the attribute does not exist.
    pub fn new(path: &str) -> std::io::Result<Self> {
        let path = PathBuf::from(path);
        std::fs::metadata(&path)?;
        Ok(Self { path })
    }

    /// Channel attribute path - useful for logging and error messages
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take one instantaneous raw sample from the channel.
    pub async fn read_raw(&mut self) -> SensorResult<u16> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SensorError::AnalogRead {
                channel: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        text.trim()
            .parse::<u16>()
            .map_err(|e| SensorError::AnalogRead {
                channel: self.path.display().to_string(),
                reason: format!("invalid raw value '{}': {}", text.trim(), e),
            })
    }
}
