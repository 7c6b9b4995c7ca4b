use super::{SensorDataFrame, SensorDriver, SensorFactory};
use crate::bus::i2c::I2CBus;
use crate::bus::BusHandle;
use crate::config::sensor_config::SensorEntry;
use crate::errors::{SensorError, SensorResult};
use async_trait::async_trait;
use tokio::time::{sleep, Duration, Instant};

// Register addresses for the TH02
const REG_STATUS: u8 = 0x00;
const REG_DATA_H: u8 = 0x01;
const REG_DATA_L: u8 = 0x02;
const REG_CONFIG: u8 = 0x03;

// CONFIG register conversion commands
const CMD_MEASURE_TEMP: u8 = 0x11;
const CMD_MEASURE_HUMI: u8 = 0x01;

// STATUS register: RDY bit is high while a conversion is in progress
const STATUS_RDY_MASK: u8 = 0x01;

const DEFAULT_ADDRESS: u8 = 0x40;

// Datasheet worst case is ~35ms per conversion
const CONVERSION_TIMEOUT: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Conversion complete when the RDY bit is clear.
fn ready_from_status(status: u8) -> bool {
    status & STATUS_RDY_MASK == 0
}

/// Temperature in °C from the raw DATA_H/DATA_L pair.
///
/// The temperature reading occupies the top 14 bits of the pair.
fn decode_temperature(raw: u16) -> f32 {
    ((raw >> 2) as f32 / 32.0) - 50.0
}

/// Relative humidity in %RH from the raw DATA_H/DATA_L pair.
///
/// The humidity reading occupies the top 12 bits of the pair.
fn decode_humidity(raw: u16) -> f32 {
    ((raw >> 4) as f32 / 16.0) - 24.0
}

/// TH02 temperature/humidity sensor.
///
/// Each measurement writes a conversion command into CONFIG, polls STATUS
/// until the device reports the conversion finished, then reads the
/// DATA_H/DATA_L register pair.
pub struct Th02 {
    id: String,
    address: u8,
    bus_id: String,
}

impl Th02 {
    pub fn new(id: String, address: u8, bus_id: String) -> Self {
        Self { id, address, bus_id }
    }

    async fn write_register(&self, bus: &mut I2CBus, reg: u8, value: u8) -> SensorResult<()> {
        bus.write_register(self.address, reg, value)
            .await
            .map_err(|e| SensorError::RegisterWrite {
                sensor: self.id.clone(),
                reg,
                source: e,
            })
    }

    async fn read_register(&self, bus: &mut I2CBus, reg: u8) -> SensorResult<u8> {
        bus.read_register(self.address, reg)
            .await
            .map_err(|e| SensorError::RegisterRead {
                sensor: self.id.clone(),
                reg,
                source: e,
            })
    }

    /// One status read; true when the pending conversion has finished.
    pub async fn is_ready(&self, bus: &mut I2CBus) -> SensorResult<bool> {
        let status = self.read_register(bus, REG_STATUS).await?;
        Ok(ready_from_status(status))
    }

    async fn wait_ready(&self, bus: &mut I2CBus) -> SensorResult<()> {
        let deadline = Instant::now() + CONVERSION_TIMEOUT;
        loop {
            if self.is_ready(bus).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SensorError::ConversionTimeout {
                    sensor: self.id.clone(),
                    timeout_ms: CONVERSION_TIMEOUT.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn read_data_pair(&self, bus: &mut I2CBus) -> SensorResult<u16> {
        let high = self.read_register(bus, REG_DATA_H).await?;
        let low = self.read_register(bus, REG_DATA_L).await?;
        Ok(((high as u16) << 8) | low as u16)
    }

    async fn measure(&self, bus: &mut I2CBus, command: u8) -> SensorResult<u16> {
        self.write_register(bus, REG_CONFIG, command).await?;
        self.wait_ready(bus).await?;
        self.read_data_pair(bus).await
    }

    /// Trigger a temperature conversion and return the result in °C.
    pub async fn temperature(&self, bus: &mut I2CBus) -> SensorResult<f32> {
        let raw = self.measure(bus, CMD_MEASURE_TEMP).await?;
        Ok(decode_temperature(raw))
    }

    /// Trigger a humidity conversion and return the result in %RH.
    pub async fn humidity(&self, bus: &mut I2CBus) -> SensorResult<f32> {
        let raw = self.measure(bus, CMD_MEASURE_HUMI).await?;
        Ok(decode_humidity(raw))
    }

    fn i2c<'a>(&self, bus: &'a mut BusHandle) -> SensorResult<&'a mut I2CBus> {
        bus.as_i2c().ok_or_else(|| SensorError::BusMismatch {
            sensor: self.id.clone(),
            bus: self.bus_id.clone(),
            expected: "i2c",
        })
    }
}

#[async_trait]
impl SensorDriver for Th02 {
    async fn init(&mut self, bus: &mut BusHandle) -> SensorResult<()> {
        let address = self.address;
        let i2c = self.i2c(bus)?;
        // The TH02 has no chip-id register; a readable STATUS register is
        // the closest presence check available.
        self.read_register(i2c, REG_STATUS)
            .await
            .map_err(|e| SensorError::Init {
                sensor: self.id.clone(),
                reason: format!("device not responding at {:#04x}: {}", address, e),
            })?;
        Ok(())
    }

    async fn sample(&self, bus: &mut BusHandle) -> SensorResult<SensorDataFrame> {
        let i2c = self.i2c(bus)?;
        let temperature = self.temperature(i2c).await?;
        let humidity = self.humidity(i2c).await?;
        Ok(SensorDataFrame {
            temperature: Some(temperature),
            humidity: Some(humidity),
            ..Default::default()
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn bus(&self) -> &str {
        &self.bus_id
    }
}

pub static TH02_FACTORY: Th02Factory = Th02Factory;

pub struct Th02Factory;

impl SensorFactory for Th02Factory {
    fn name(&self) -> &'static str {
        "th02"
    }

    fn create(&self, entry: &SensorEntry) -> SensorResult<Box<dyn SensorDriver + Send>> {
        Ok(Box::new(Th02::new(
            entry.id.clone(),
            entry.address.unwrap_or(DEFAULT_ADDRESS),
            entry.bus.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_temperature_from_register_pair() {
        // 0x1E00 >> 2 = 1920; 1920/32 - 50 = 10.0
        assert_eq!(decode_temperature(0x1E00), 10.0);
    }

    #[test]
    fn decodes_humidity_from_register_pair() {
        // 0x0C00 >> 4 = 192; 192/16 - 24 = -12.0
        assert_eq!(decode_humidity(0x0C00), -12.0);
    }

    #[test]
    fn ready_bit_polarity_is_inverted() {
        // RDY set means a conversion is still in progress
        assert!(!ready_from_status(0x01));
        assert!(ready_from_status(0x00));
        // unrelated status bits do not affect readiness
        assert!(ready_from_status(0xFE));
    }

    #[test]
    fn register_pair_is_big_endian() {
        let raw = ((0x1E_u16) << 8) | 0x40;
        assert_eq!(raw, 0x1E40);
        // shift discards the two low status bits of DATA_L
        assert_eq!(decode_temperature(raw), (0x0790 as f32 / 32.0) - 50.0);
    }
}
