pub mod aio;
pub mod i2c;

use aio::AnalogInput;
use i2c::I2CBus;

/// A bus handle owned by the registry and shared across sensor tasks.
///
/// The bus map holds one entry per `[[bus]]` config section; drivers pick
/// out the kind they need at init/sample time.
pub enum BusHandle {
    I2c(I2CBus),
    Analog(AnalogInput),
}

impl BusHandle {
    pub fn as_i2c(&mut self) -> Option<&mut I2CBus> {
        match self {
            BusHandle::I2c(bus) => Some(bus),
            _ => None,
        }
    }

    pub fn as_analog(&mut self) -> Option<&mut AnalogInput> {
        match self {
            BusHandle::Analog(input) => Some(input),
            _ => None,
        }
    }
}
