//! Gate actuator state machine
//!
//! Drives the barrier servo through a bounded-rate ramp. The four states
//! make illegal transitions unrepresentable: an open request while the
//! gate is anywhere in its open/hold/close cycle is silently dropped, so
//! the hold timer is never reset and the ramp never desynchronizes.
//!
//! ```text
//! Closed -> Opening -> OpenHolding -> Closing -> Closed
//! ```
//!
//! The servo is never commanded faster than one step per quantum; angles
//! are clamped to `0..=open_angle` so an impossible position cannot be
//! requested.

use crate::config::GateConfig;
use crate::time::Instant;

/// Barrier position in its open/close cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// Barrier down, idle
    Closed,
    /// Ramping toward the open angle
    Opening { close_at: Instant },
    /// Fully open, waiting for the hold timer
    OpenHolding { close_at: Instant },
    /// Ramping back toward zero
    Closing,
}

/// Gate actuator controller
///
/// Sole owner of the servo target: collaborators only ever call
/// [`request_open`](GateController::request_open).
#[derive(Debug)]
pub struct GateController {
    config: GateConfig,
    state: GateState,
    angle: u8,
    last_step_at: Instant,
    cooldown_until: Option<Instant>,
}

impl GateController {
    /// Create a controller with the barrier closed
    pub fn new(config: GateConfig, start: Instant) -> Self {
        Self {
            config,
            state: GateState::Closed,
            angle: 0,
            last_step_at: start,
            cooldown_until: None,
        }
    }

    /// Current state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Current commanded barrier angle
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// True from "open requested" until the auto-close completes
    pub fn is_operating(&self) -> bool {
        !matches!(self.state, GateState::Closed)
    }

    /// Whether entry detection may run: gate idle and cooldown elapsed
    pub fn entry_allowed(&self, now: Instant) -> bool {
        if self.is_operating() {
            return false;
        }
        match self.cooldown_until {
            Some(until) => now.at_or_after(until),
            None => true,
        }
    }

    /// Request an open/hold/close cycle
    ///
    /// No-op while a cycle is in progress; returns whether the request
    /// was accepted. The auto-close deadline is armed here.
    pub fn request_open(&mut self, now: Instant) -> bool {
        if self.is_operating() {
            return false;
        }
        self.state = GateState::Opening {
            close_at: now.plus_ms(self.config.open_hold_ms),
        };
        true
    }

    /// Advance the ramp and the open/close cycle by one tick
    ///
    /// Returns the new angle when the servo should be re-commanded, or
    /// `None` when nothing moved this tick. Must be called every loop
    /// iteration regardless of triggers.
    pub fn tick(&mut self, now: Instant) -> Option<u8> {
        // Auto-close: fires even if the barrier never finished opening
        match self.state {
            GateState::Opening { close_at } | GateState::OpenHolding { close_at }
                if now.at_or_after(close_at) =>
            {
                self.state = GateState::Closing;
            }
            _ => {}
        }

        let stepped = self.step_ramp(now);

        match self.state {
            GateState::Opening { close_at } if self.angle >= self.config.open_angle => {
                self.state = GateState::OpenHolding { close_at };
            }
            GateState::Closing if self.angle == 0 => {
                self.state = GateState::Closed;
                self.cooldown_until = Some(now.plus_ms(self.config.cooldown_ms));
            }
            _ => {}
        }

        stepped
    }

    /// Move the angle one bounded step toward the target, rate-limited
    fn step_ramp(&mut self, now: Instant) -> Option<u8> {
        let target = self.target_angle();
        if self.angle == target || now.since(self.last_step_at) < self.config.step_interval_ms {
            return None;
        }
        self.angle = if self.angle < target {
            self.angle.saturating_add(self.config.step_deg).min(target)
        } else {
            self.angle.saturating_sub(self.config.step_deg).max(target)
        };
        self.last_step_at = now;
        Some(self.angle)
    }

    fn target_angle(&self) -> u8 {
        match self.state {
            GateState::Opening { .. } | GateState::OpenHolding { .. } => self.config.open_angle,
            GateState::Closing | GateState::Closed => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateController {
        GateController::new(GateConfig::default(), Instant::from_ms(0))
    }

    /// Run ticks every 20ms until `end_ms`
    fn run_until(g: &mut GateController, from_ms: u32, end_ms: u32) {
        let mut t = from_ms;
        while t <= end_ms {
            g.tick(Instant::from_ms(t));
            t += 20;
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut g = gate();
        assert!(g.request_open(Instant::from_ms(100)));
        assert!(g.is_operating());

        // Ramp up: 50 deg/step, so two steps reach 90
        run_until(&mut g, 120, 200);
        assert_eq!(g.angle(), 90);
        assert!(matches!(g.state(), GateState::OpenHolding { .. }));

        // Hold expires 3000ms after the request
        run_until(&mut g, 220, 3120);
        assert_eq!(g.state(), GateState::Closed);
        assert_eq!(g.angle(), 0);
        assert!(!g.is_operating());
    }

    #[test]
    fn test_reentrant_request_is_dropped() {
        let mut g = gate();
        assert!(g.request_open(Instant::from_ms(0)));
        let armed = g.state();

        run_until(&mut g, 20, 100);
        // Second request mid-cycle: rejected, deadline and angle untouched
        let angle = g.angle();
        assert!(!g.request_open(Instant::from_ms(1000)));
        assert_eq!(g.angle(), angle);
        if let (GateState::Opening { close_at: a } | GateState::OpenHolding { close_at: a },
                GateState::Opening { close_at: b } | GateState::OpenHolding { close_at: b }) =
            (armed, g.state())
        {
            assert_eq!(a, b);
        } else {
            panic!("gate left its open cycle");
        }
    }

    #[test]
    fn test_ramp_is_rate_limited() {
        let mut g = gate();
        g.request_open(Instant::from_ms(0));

        assert_eq!(g.tick(Instant::from_ms(20)), Some(50));
        // 10ms later: under the 20ms quantum, no step
        assert_eq!(g.tick(Instant::from_ms(30)), None);
        assert_eq!(g.tick(Instant::from_ms(40)), Some(90));
        // At target: no further steps
        assert_eq!(g.tick(Instant::from_ms(60)), None);
    }

    #[test]
    fn test_angle_clamped_at_bounds() {
        let mut g = gate();
        g.request_open(Instant::from_ms(0));
        run_until(&mut g, 20, 3200);
        assert_eq!(g.angle(), 0);
        // A full cycle never leaves 0..=90
        g.request_open(Instant::from_ms(10_000));
        let mut t = 10_020;
        while t < 14_000 {
            g.tick(Instant::from_ms(t));
            assert!(g.angle() <= 90);
            t += 20;
        }
    }

    #[test]
    fn test_cooldown_suppresses_entry_after_close() {
        let mut g = gate();
        assert!(g.entry_allowed(Instant::from_ms(0)));

        g.request_open(Instant::from_ms(0));
        assert!(!g.entry_allowed(Instant::from_ms(50)));

        run_until(&mut g, 20, 3200);
        assert_eq!(g.state(), GateState::Closed);

        // Cooldown armed at close; 5000ms must elapse
        assert!(!g.entry_allowed(Instant::from_ms(4000)));
        assert!(!g.entry_allowed(Instant::from_ms(8000)));
        assert!(g.entry_allowed(Instant::from_ms(8220)));
    }

    #[test]
    fn test_open_requestable_during_cooldown() {
        // Cooldown gates entry detection only; an exit event may still
        // open the gate immediately after it closed.
        let mut g = gate();
        g.request_open(Instant::from_ms(0));
        run_until(&mut g, 20, 3200);
        assert_eq!(g.state(), GateState::Closed);
        assert!(g.request_open(Instant::from_ms(3300)));
    }
}
