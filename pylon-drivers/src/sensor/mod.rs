//! Sensor drivers

pub mod hcsr04;
pub mod ir;

pub use hcsr04::{EchoTimer, Hcsr04};
pub use ir::IrSensor;
