//! Board glue between RP2040 peripherals and the driver traits

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use pylon_core::traits::GateServo;
use pylon_drivers::sensor::EchoTimer;
use pylon_drivers::servo::compare_for_angle;

/// PWM counter top: with a 1MHz tick this is the 20ms servo period,
/// one count per microsecond
pub const SERVO_PWM_TOP: u16 = 19_999;

/// Echo pulse timer backed by the embassy uptime clock
pub struct UptimeTimer;

impl EchoTimer for UptimeTimer {
    fn now_us(&mut self) -> u32 {
        embassy_time::Instant::now().as_micros() as u32
    }
}

/// Barrier servo on a PWM slice
///
/// The slice is configured once in main; angle changes only move the
/// channel A compare value.
pub struct BarrierServo {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl BarrierServo {
    pub fn new(pwm: Pwm<'static>, config: PwmConfig) -> Self {
        Self { pwm, config }
    }
}

impl GateServo for BarrierServo {
    fn set_angle(&mut self, degrees: u8) {
        self.config.compare_a = compare_for_angle(degrees, SERVO_PWM_TOP);
        self.pwm.set_config(&self.config);
    }
}
