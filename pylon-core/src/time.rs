//! Millisecond clock arithmetic
//!
//! The controller runs off a free-running `u32` millisecond counter that
//! wraps after about 49.7 days. All elapsed-time comparisons go through
//! wrapping subtraction interpreted as a signed difference, so a counter
//! wrap between two samples never corrupts a timeout.

/// A point in time, in milliseconds since boot.
///
/// Wraps silently; only differences between two instants are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant {
    ms: u32,
}

impl Instant {
    /// Create an instant from a raw millisecond counter value
    pub const fn from_ms(ms: u32) -> Self {
        Self { ms }
    }

    /// Raw counter value
    pub const fn as_ms(self) -> u32 {
        self.ms
    }

    /// Milliseconds elapsed since `earlier`
    ///
    /// Correct across counter wrap as long as the real gap is under
    /// half the counter range (~24.8 days).
    pub const fn since(self, earlier: Instant) -> u32 {
        self.ms.wrapping_sub(earlier.ms)
    }

    /// Whether this instant is at or past `deadline`
    pub const fn at_or_after(self, deadline: Instant) -> bool {
        self.ms.wrapping_sub(deadline.ms) as i32 >= 0
    }

    /// The instant `ms` milliseconds after this one
    pub const fn plus_ms(self, ms: u32) -> Instant {
        Instant {
            ms: self.ms.wrapping_add(ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since() {
        let t0 = Instant::from_ms(1000);
        let t1 = Instant::from_ms(1300);
        assert_eq!(t1.since(t0), 300);
    }

    #[test]
    fn test_since_across_wrap() {
        let t0 = Instant::from_ms(u32::MAX - 99);
        let t1 = t0.plus_ms(250);
        assert_eq!(t1.since(t0), 250);
        assert_eq!(t1.as_ms(), 150);
    }

    #[test]
    fn test_deadline_comparison() {
        let now = Instant::from_ms(5000);
        let deadline = now.plus_ms(3000);
        assert!(!now.at_or_after(deadline));
        assert!(now.plus_ms(3000).at_or_after(deadline));
        assert!(now.plus_ms(4000).at_or_after(deadline));
    }

    #[test]
    fn test_deadline_comparison_across_wrap() {
        let now = Instant::from_ms(u32::MAX - 10);
        let deadline = now.plus_ms(100);
        assert!(!now.at_or_after(deadline));
        assert!(now.plus_ms(100).at_or_after(deadline));
        assert!(now.plus_ms(500).at_or_after(deadline));
    }
}
