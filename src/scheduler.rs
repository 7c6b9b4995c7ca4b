use crate::config::sensor_config::SensorConfig;
use crate::messages::{EnvironmentMessage, GyroMessage, Header, SensorMessage};
use crate::registry::BusMap;
use crate::sensors::{SensorDataFrame, SensorDriver};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

const DEVICE_ID: &str = "grove_hub";
const DEFAULT_FREQUENCY_HZ: u32 = 10;

/// Spawn one sampling task per sensor at its configured frequency.
///
/// Each task locks the shared bus only for the duration of one sample,
/// publishes the resulting messages to the log, and keeps running through
/// per-sample errors.
pub async fn spawn_sensor_tasks(
    sensors: Vec<Box<dyn SensorDriver>>,
    buses: BusMap,
    sensor_config: &SensorConfig,
) {
    for sensor in sensors.into_iter() {
        let sensor_id = sensor.id().to_string();
        let bus = buses.get(sensor.bus()).unwrap().clone();

        let frequency = sensor_config
            .sensors
            .iter()
            .find(|s| s.id == sensor_id)
            .and_then(|s| s.frequency)
            .unwrap_or(DEFAULT_FREQUENCY_HZ);
        let sleep_duration = Duration::from_millis((1000.0 / frequency as f32) as u64);
        let mut sequence_counter = 0u64;

        tokio::spawn(async move {
            info!("[{}] starting sensor task at {}Hz", sensor_id, frequency);

            loop {
                let mut bus_lock = bus.lock().await;
                let result = sensor.sample(&mut bus_lock).await;
                drop(bus_lock); // Release lock early

                match result {
                    Ok(frame) => {
                        sequence_counter += 1;
                        let header =
                            Header::new(DEVICE_ID.to_string(), sensor_id.clone(), sequence_counter);
                        for msg in frame_to_messages(&frame, header) {
                            match msg.to_json() {
                                Ok(json) => {
                                    info!(target: "grove_sensorhub::readings", "{}", json)
                                }
                                Err(e) => warn!("[{}] failed to encode message: {}", sensor_id, e),
                            }
                        }
                    }
                    Err(e) => {
                        warn!("[{}] sensor sample error: {}", sensor_id, e);
                    }
                }

                sleep(sleep_duration).await;
            }
        });
    }
}

/// Convert a data frame into typed messages based on the quantities present.
fn frame_to_messages(frame: &SensorDataFrame, header: Header) -> Vec<SensorMessage> {
    let mut messages = Vec::new();

    if let Some(dps) = frame.angular_velocity {
        messages.push(SensorMessage::Gyro(GyroMessage {
            h: header.clone(),
            angular_velocity_dps: dps,
        }));
    }

    if let (Some(temperature_c), Some(humidity_rh)) = (frame.temperature, frame.humidity) {
        messages.push(SensorMessage::Environment(EnvironmentMessage {
            h: header.clone(),
            temperature_c,
            humidity_rh,
        }));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyro_frame_maps_to_gyro_message() {
        let frame = SensorDataFrame {
            angular_velocity: Some(12.5),
            ..Default::default()
        };
        let header = Header::new(DEVICE_ID.to_string(), "gyro0".to_string(), 1);

        let messages = frame_to_messages(&frame, header);
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            SensorMessage::Gyro(g) if g.angular_velocity_dps == 12.5
        ));
    }

    #[test]
    fn environment_frame_maps_to_environment_message() {
        let frame = SensorDataFrame {
            temperature: Some(10.0),
            humidity: Some(-12.0),
            ..Default::default()
        };
        let header = Header::new(DEVICE_ID.to_string(), "env0".to_string(), 1);

        let messages = frame_to_messages(&frame, header);
        assert_eq!(messages.len(), 1);
        assert!(matches!(&messages[0], SensorMessage::Environment(_)));
    }

    #[test]
    fn empty_frame_produces_no_messages() {
        let header = Header::new(DEVICE_ID.to_string(), "none".to_string(), 1);
        assert!(frame_to_messages(&SensorDataFrame::default(), header).is_empty());
    }
}
