//! GPIO indicator outputs

use embedded_hal::digital::OutputPin;

use pylon_core::traits::StatusLed;

/// Active-high LED on a GPIO output
pub struct GpioLed<P> {
    pin: P,
}

impl<P: OutputPin> GpioLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> StatusLed for GpioLed<P> {
    fn set_on(&mut self, on: bool) {
        if on {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct FakePin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_led_follows_commands() {
        let mut led = GpioLed::new(FakePin { high: false });
        led.set_on(true);
        assert!(led.pin.high);
        led.set_on(false);
        assert!(!led.pin.high);
    }
}
