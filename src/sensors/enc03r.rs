use super::{SensorDataFrame, SensorDriver, SensorFactory};
use crate::bus::aio::AnalogInput;
use crate::bus::BusHandle;
use crate::config::sensor_config::SensorEntry;
use crate::errors::{SensorError, SensorResult};
use async_trait::async_trait;
use tokio::time::{sleep, Duration};

// ENC-03R electrical characteristics
const ADC_FULL_SCALE: f32 = 1023.0; // 10-bit converter
const SENSITIVITY_V_PER_DPS: f32 = 0.00067; // 0.67 mV per deg/s

const DEFAULT_VREF: f32 = 5.0;
const DEFAULT_CALIBRATION_SAMPLES: u32 = 50;

// Gap between calibration samples so the ADC sees distinct conversions
const CALIBRATION_SAMPLE_GAP: Duration = Duration::from_millis(2);

/// ENC-03R single-axis analog gyroscope.
///
/// Reports angular velocity about the sensing axis relative to a
/// zero-rotation baseline. The baseline is measured at init by averaging
/// readings with the sensor at rest; readings are meaningless until then.
pub struct Enc03r {
    id: String,
    bus_id: String,
    vref: f32,
    calibration_samples: u32,
    baseline: f32,
}

impl Enc03r {
    pub fn new(id: String, bus_id: String, vref: f32, calibration_samples: u32) -> Self {
        Self {
            id,
            bus_id,
            vref,
            calibration_samples,
            baseline: 0.0,
        }
    }

    // deg/s per ADC count
    fn scale_factor(&self) -> f32 {
        (self.vref / ADC_FULL_SCALE) / SENSITIVITY_V_PER_DPS
    }

    /// Average `samples` consecutive readings with the sensor at rest and
    /// store the mean as the zero-rotation baseline. Recalibrating
    /// overwrites the previous baseline.
    pub async fn calibrate(&mut self, input: &mut AnalogInput, samples: u32) -> SensorResult<()> {
        if samples == 0 {
            return Err(SensorError::Calibration {
                sensor: self.id.clone(),
                reason: "sample count must be non-zero".to_string(),
            });
        }

        let mut total = 0.0f32;
        for _ in 0..samples {
            total += input.read_raw().await? as f32;
            sleep(CALIBRATION_SAMPLE_GAP).await;
        }
        self.baseline = total / samples as f32;
        Ok(())
    }

    /// Last stored zero-rotation baseline (0.0 before first calibration).
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Take one instantaneous raw reading from the channel.
    pub async fn read_raw(&self, input: &mut AnalogInput) -> SensorResult<u16> {
        input.read_raw().await
    }

    /// Angular velocity in deg/s for a raw sample against the stored
    /// baseline. Pure arithmetic, no hardware access.
    pub fn angular_velocity(&self, raw: u16) -> f32 {
        (raw as f32 - self.baseline) * self.scale_factor()
    }

    fn analog<'a>(&self, bus: &'a mut BusHandle) -> SensorResult<&'a mut AnalogInput> {
        bus.as_analog().ok_or_else(|| SensorError::BusMismatch {
            sensor: self.id.clone(),
            bus: self.bus_id.clone(),
            expected: "aio",
        })
    }
}

#[async_trait]
impl SensorDriver for Enc03r {
    async fn init(&mut self, bus: &mut BusHandle) -> SensorResult<()> {
        let samples = self.calibration_samples;
        let input = self.analog(bus)?;
        self.calibrate(input, samples).await
    }

    async fn sample(&self, bus: &mut BusHandle) -> SensorResult<SensorDataFrame> {
        let input = self.analog(bus)?;
        let raw = self.read_raw(input).await?;
        Ok(SensorDataFrame {
            angular_velocity: Some(self.angular_velocity(raw)),
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

pub static ENC03R_FACTORY: Enc03rFactory = Enc03rFactory;

pub struct Enc03rFactory;

impl SensorFactory for Enc03rFactory {
    fn name(&self) -> &'static str {
        "enc03r"
    }

    fn create(&self, entry: &SensorEntry) -> SensorResult<Box<dyn SensorDriver + Send>> {
        if entry.calibration_samples == Some(0) {
            return Err(SensorError::Config {
                sensor: entry.id.clone(),
                reason: "calibration_samples must be non-zero".to_string(),
            });
        }
        Ok(Box::new(Enc03r::new(
            entry.id.clone(),
            entry.bus.clone(),
            entry.vref.unwrap_or(DEFAULT_VREF),
            entry
                .calibration_samples
                .unwrap_or(DEFAULT_CALIBRATION_SAMPLES),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gyro_with_baseline(baseline: f32) -> Enc03r {
        let mut gyro = Enc03r::new("gyro0".to_string(), "aio0".to_string(), 5.0, 50);
        gyro.baseline = baseline;
        gyro
    }

    #[test]
    fn velocity_is_zero_at_baseline() {
        let gyro = gyro_with_baseline(512.0);
        assert_eq!(gyro.angular_velocity(512), 0.0);
    }

    #[test]
    fn velocity_is_linear_in_raw_value() {
        let gyro = gyro_with_baseline(512.0);
        let diff = gyro.angular_velocity(600) - gyro.angular_velocity(500);
        let expected = gyro.scale_factor() * 100.0;
        assert!((diff - expected).abs() < 1e-3);
    }

    #[test]
    fn scale_factor_matches_sensitivity() {
        // 5V reference, 10-bit ADC, 0.67 mV per deg/s: one count is
        // 5/1023 V = ~7.295 deg/s
        let gyro = gyro_with_baseline(0.0);
        assert!((gyro.scale_factor() - 7.2948).abs() < 1e-3);
    }

    #[test]
    fn uncalibrated_baseline_is_zero() {
        let gyro = Enc03r::new("gyro0".to_string(), "aio0".to_string(), 5.0, 50);
        assert_eq!(gyro.baseline(), 0.0);
    }

    #[test]
    fn factory_rejects_zero_calibration_samples() {
        let entry = SensorEntry {
            id: "gyro0".to_string(),
            driver: "enc03r".to_string(),
            bus: "aio0".to_string(),
            address: None,
            vref: None,
            calibration_samples: Some(0),
            frequency: None,
        };
        assert!(matches!(
            ENC03R_FACTORY.create(&entry),
            Err(SensorError::Config { .. })
        ));
    }
}
