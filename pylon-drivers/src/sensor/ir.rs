//! IR reflective slot sensor
//!
//! The modules used in the lot pull their output low while the beam is
//! reflected (vehicle present), so the reading is inverted here and the
//! rest of the system only ever sees "blocked" booleans.

use embedded_hal::digital::InputPin;

use pylon_core::traits::BaySensor;

/// Active-low IR presence sensor on a GPIO input
pub struct IrSensor<P> {
    pin: P,
}

impl<P: InputPin> IrSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> BaySensor for IrSensor<P> {
    fn is_blocked(&mut self) -> bool {
        // A read error counts as "clear"; the debounce window upstream
        // absorbs a one-tick glitch either way.
        self.pin.is_low().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct FakePin {
        low: bool,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(!self.low)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(self.low)
        }
    }

    #[test]
    fn test_low_means_blocked() {
        let mut s = IrSensor::new(FakePin { low: true });
        assert!(s.is_blocked());
        let mut s = IrSensor::new(FakePin { low: false });
        assert!(!s.is_blocked());
    }
}
