//! HC-SR04 ultrasonic range sensor
//!
//! Fires a 10us trigger pulse and times the echo pulse width. Sound
//! travels ~58.3us per centimeter of round trip, so distance_mm =
//! pulse_us * 100 / 583. A missing echo (nothing in range, absorbent
//! surface) is reported as [`NO_ECHO_MM`], not as an error.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use pylon_core::config::NO_ECHO_MM;
use pylon_core::traits::ProximitySensor;

/// Echo timeout: ~5m round trip, beyond the sensor's rated range
pub const ECHO_TIMEOUT_US: u32 = 30_000;

/// Free-running microsecond counter for echo pulse timing
pub trait EchoTimer {
    /// Current counter value; wraps, only differences are used
    fn now_us(&mut self) -> u32;
}

/// HC-SR04 driver
pub struct Hcsr04<TRIG, ECHO, D, T> {
    trig: TRIG,
    echo: ECHO,
    delay: D,
    timer: T,
}

impl<TRIG, ECHO, D, T> Hcsr04<TRIG, ECHO, D, T>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    T: EchoTimer,
{
    pub fn new(trig: TRIG, echo: ECHO, delay: D, timer: T) -> Self {
        Self {
            trig,
            echo,
            delay,
            timer,
        }
    }

    /// Fire the trigger and measure the echo pulse width in microseconds
    fn measure_pulse_us(&mut self) -> Option<u32> {
        let _ = self.trig.set_low();
        self.delay.delay_us(2);
        let _ = self.trig.set_high();
        self.delay.delay_us(10);
        let _ = self.trig.set_low();

        // Wait for the echo line to rise
        let wait_start = self.timer.now_us();
        while !self.echo.is_high().unwrap_or(false) {
            if self.timer.now_us().wrapping_sub(wait_start) > ECHO_TIMEOUT_US {
                return None;
            }
        }

        // Time the high pulse
        let rise = self.timer.now_us();
        loop {
            if !self.echo.is_high().unwrap_or(false) {
                return Some(self.timer.now_us().wrapping_sub(rise));
            }
            if self.timer.now_us().wrapping_sub(rise) > ECHO_TIMEOUT_US {
                return None;
            }
        }
    }
}

impl<TRIG, ECHO, D, T> ProximitySensor for Hcsr04<TRIG, ECHO, D, T>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    T: EchoTimer,
{
    fn read_distance_mm(&mut self) -> u16 {
        match self.measure_pulse_us() {
            Some(pulse_us) => {
                let mm = pulse_us * 100 / 583;
                mm.min(NO_ECHO_MM as u32) as u16
            }
            None => NO_ECHO_MM,
        }
    }
}
