//! Debounce and occupancy engine
//!
//! Converts raw per-slot IR readings into stable occupancy transitions.
//! A transition is confirmed only after the raw signal has held its new
//! state for a full window: 300 ms for entries (fast billing start),
//! 1000 ms for exits (a car settling into a bay flickers the beam and
//! must not look like a departure). Any raw flip restarts the window.

use heapless::Vec;

use crate::config::{ParkingConfig, MAX_SLOTS};
use crate::ledger::{ParkingManager, Ticket};
use crate::time::Instant;

/// Last observed raw beam state and when it was first seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RawState {
    Blocked { since: Instant },
    Clear { since: Instant },
}

impl RawState {
    fn is_blocked(self) -> bool {
        matches!(self, RawState::Blocked { .. })
    }

    fn since(self) -> Instant {
        match self {
            RawState::Blocked { since } | RawState::Clear { since } => since,
        }
    }
}

/// Result of one scan over all slots
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// At least one slot changed occupancy this tick
    pub changed: bool,
    /// At least one vehicle vacated a slot (triggers gate opening)
    pub exit_detected: bool,
    /// Tickets closed this tick, for receipt notification
    pub closed: Vec<Ticket, MAX_SLOTS>,
}

/// Per-slot debounce state
#[derive(Debug)]
pub struct OccupancyEngine {
    entry_debounce_ms: u32,
    exit_grace_ms: u32,
    raw: Vec<RawState, MAX_SLOTS>,
}

impl OccupancyEngine {
    /// Create an engine with all beams assumed clear at `start`
    pub fn new(config: &ParkingConfig, start: Instant) -> Self {
        let count = (config.slot_count as usize).min(MAX_SLOTS);
        let mut raw = Vec::new();
        for _ in 0..count {
            let _ = raw.push(RawState::Clear { since: start });
        }
        Self {
            entry_debounce_ms: config.entry_debounce_ms,
            exit_grace_ms: config.exit_grace_ms,
            raw,
        }
    }

    /// Feed one tick of raw readings through the debounce windows
    ///
    /// Emits at most one occupancy transition per slot per tick, applied
    /// directly to the ledger. Extra readings beyond the slot count are
    /// ignored; missing readings leave their slot untouched.
    pub fn scan(
        &mut self,
        readings: &[bool],
        now: Instant,
        ledger: &mut ParkingManager,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for (index, state) in self.raw.iter_mut().enumerate() {
            let Some(&blocked) = readings.get(index) else {
                break;
            };

            if blocked != state.is_blocked() {
                // Raw flip: restart the confirmation window
                *state = if blocked {
                    RawState::Blocked { since: now }
                } else {
                    RawState::Clear { since: now }
                };
                continue;
            }

            let held_ms = now.since(state.since());

            if blocked && !ledger.slot_occupied(index) && held_ms >= self.entry_debounce_ms {
                if ledger.occupy(index, now).is_some() {
                    outcome.changed = true;
                }
                *state = RawState::Blocked { since: now };
            } else if !blocked && ledger.slot_occupied(index) && held_ms >= self.exit_grace_ms {
                if let Some(ticket) = ledger.release(index, now) {
                    let _ = outcome.closed.push(ticket);
                    outcome.changed = true;
                    outcome.exit_detected = true;
                }
                *state = RawState::Clear { since: now };
            }
        }

        ledger.purge_recent(now);
        outcome
    }
}
