//! Hobby servo PWM math
//!
//! Standard 50 Hz servo signalling: a 500us pulse is 0 degrees, 2500us
//! is 180 degrees. The firmware configures its PWM slice for a 20ms
//! period and converts barrier angles to compare values here; the ramp
//! itself lives in the gate controller.

/// Servo signal frequency
pub const PWM_FREQ_HZ: u32 = 50;
/// Pulse width at 0 degrees
pub const MIN_PULSE_US: u32 = 500;
/// Pulse width at 180 degrees
pub const MAX_PULSE_US: u32 = 2500;
/// 50 Hz period
pub const PERIOD_US: u32 = 20_000;

/// Pulse width for a given angle (clamped to 0..=180)
pub const fn pulse_us_for_angle(angle: u8) -> u32 {
    let angle = if angle > 180 { 180 } else { angle } as u32;
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / 180
}

/// PWM compare value for a given angle and counter top
///
/// Assumes the slice counts `top + 1` ticks per 20ms period.
pub const fn compare_for_angle(angle: u8, top: u16) -> u16 {
    (pulse_us_for_angle(angle) * (top as u32 + 1) / PERIOD_US) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_endpoints() {
        assert_eq!(pulse_us_for_angle(0), 500);
        assert_eq!(pulse_us_for_angle(90), 1500);
        assert_eq!(pulse_us_for_angle(180), 2500);
    }

    #[test]
    fn test_over_range_angle_clamps() {
        assert_eq!(pulse_us_for_angle(200), 2500);
    }

    #[test]
    fn test_compare_at_microsecond_resolution() {
        // top = 19999 with a 1MHz tick: one count per microsecond
        assert_eq!(compare_for_angle(0, 19_999), 500);
        assert_eq!(compare_for_angle(90, 19_999), 1500);
    }
}
