use crate::bus::i2c::I2CError;
use thiserror::Error;

/// Error types for the Grove SensorHub
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("I2C communication failed: {0}")]
    I2c(#[from] I2CError),

    #[error("Sensor '{sensor}' initialization failed: {reason}")]
    Init { sensor: String, reason: String },

    #[error("Sensor '{sensor}' write to register {reg:#04x} failed: {source}")]
    RegisterWrite {
        sensor: String,
        reg: u8,
        #[source]
        source: I2CError,
    },

    #[error("Sensor '{sensor}' read of register {reg:#04x} failed: {source}")]
    RegisterRead {
        sensor: String,
        reg: u8,
        #[source]
        source: I2CError,
    },

    #[error("Analog channel '{channel}' read failed: {reason}")]
    AnalogRead { channel: String, reason: String },

    #[error("Sensor '{sensor}' conversion not ready after {timeout_ms}ms")]
    ConversionTimeout { sensor: String, timeout_ms: u64 },

    #[error("Sensor '{sensor}' calibration failed: {reason}")]
    Calibration { sensor: String, reason: String },

    #[error("Sensor '{sensor}' expects a {expected} bus, but '{bus}' is not one")]
    BusMismatch {
        sensor: String,
        bus: String,
        expected: &'static str,
    },

    #[error("Invalid sensor configuration for '{sensor}': {reason}")]
    Config { sensor: String, reason: String },

    #[error("Unsupported sensor driver: '{driver}'")]
    UnsupportedDriver { driver: String },

    #[error("Bus '{bus}' not found or unavailable")]
    BusNotFound { bus: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    Format(#[from] toml::de::Error),
}

/// Registry and initialization errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Sensor registration failed: {0}")]
    Registration(#[source] SensorError),

    #[error("Bus configuration failed: {0}")]
    BusInit(#[from] ConfigError),

    #[error("Bus '{bus}' failed to open: {reason}")]
    BusOpen { bus: String, reason: String },

    #[error("Failed to create sensor driver: {0}")]
    DriverCreation(#[source] SensorError),
}

/// Result type aliases for convenience
pub type SensorResult<T> = Result<T, SensorError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RegistryResult<T> = Result<T, RegistryError>;
