use serde::{Deserialize, Serialize};

/// Header metadata common to all sensor messages
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Unique device identifier
    pub device_id: String,
    /// Sensor identifier (e.g., "gyro0", "env0")
    pub sensor_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
}

impl Header {
    /// Create a new header stamped with the current time
    pub fn new(device_id: String, sensor_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let t_utc_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            device_id,
            sensor_id,
            seq,
            t_utc_ns,
        }
    }
}

/// Single-axis gyroscope data
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GyroMessage {
    pub h: Header,
    /// Angular velocity about the sensing axis (deg/s)
    pub angular_velocity_dps: f32,
}

/// Ambient temperature/humidity data
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EnvironmentMessage {
    pub h: Header,
    /// Ambient temperature (°C)
    pub temperature_c: f32,
    /// Relative humidity (%RH)
    pub humidity_rh: f32,
}

/// Unified sensor message enum for different sensor types
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum SensorMessage {
    Gyro(GyroMessage),
    Environment(EnvironmentMessage),
}

impl SensorMessage {
    /// Get the header from any sensor message
    pub fn header(&self) -> &Header {
        match self {
            SensorMessage::Gyro(msg) => &msg.h,
            SensorMessage::Environment(msg) => &msg.h,
        }
    }

    /// Get the sensor ID from any sensor message
    pub fn sensor_id(&self) -> &str {
        &self.header().sensor_id
    }

    /// Serialize to one-line JSON for log output
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_creation() {
        let header = Header::new("grove_hub".to_string(), "gyro0".to_string(), 42);

        assert_eq!(header.device_id, "grove_hub");
        assert_eq!(header.sensor_id, "gyro0");
        assert_eq!(header.seq, 42);
        assert!(header.t_utc_ns > 0);
    }

    #[test]
    fn environment_message_serialization() {
        let header = Header::new("grove_hub".to_string(), "env0".to_string(), 1);

        let env_msg = EnvironmentMessage {
            h: header,
            temperature_c: 21.5,
            humidity_rh: 48.0,
        };

        let sensor_msg = SensorMessage::Environment(env_msg);
        assert_eq!(sensor_msg.sensor_id(), "env0");

        // Test JSON serialization round-trip
        let json = sensor_msg.to_json().unwrap();
        assert!(json.contains("env0"));
        assert!(json.contains("21.5"));

        let decoded: SensorMessage = serde_json::from_str(&json).unwrap();
        match decoded {
            SensorMessage::Environment(decoded_env) => {
                assert_eq!(decoded_env.temperature_c, 21.5);
                assert_eq!(decoded_env.humidity_rh, 48.0);
                assert_eq!(decoded_env.h.sensor_id, "env0");
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn gyro_message_serialization() {
        let header = Header::new("grove_hub".to_string(), "gyro0".to_string(), 7);
        let msg = SensorMessage::Gyro(GyroMessage {
            h: header,
            angular_velocity_dps: -3.25,
        });

        let json = msg.to_json().unwrap();
        let decoded: SensorMessage = serde_json::from_str(&json).unwrap();
        match decoded {
            SensorMessage::Gyro(gyro) => {
                assert_eq!(gyro.angular_velocity_dps, -3.25);
                assert_eq!(gyro.h.seq, 7);
            }
            _ => panic!("Wrong message type"),
        }
    }
}
