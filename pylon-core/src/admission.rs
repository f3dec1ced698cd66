//! Entry admission logic
//!
//! Gates physical arrival behind slot availability and the post-close
//! cooldown. Admission only ever opens the gate; the ticket is created
//! later, by the occupancy engine, once the car is detected inside a
//! slot. The gap where a car is through the gate but not yet parked is
//! deliberate.

use crate::config::AdmissionConfig;
use crate::gate::GateController;
use crate::time::Instant;

/// Outcome of evaluating one proximity reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdmissionDecision {
    /// Vehicle at the gate and a slot is free: open the gate
    Admit,
    /// Nothing within the detection threshold
    OutOfRange,
    /// Vehicle at the gate but the lot is full: no gate motion, no ticket
    Denied,
}

/// Entry admission rule
#[derive(Debug)]
pub struct EntryAdmission {
    detect_mm: u16,
}

impl EntryAdmission {
    pub fn new(config: &AdmissionConfig) -> Self {
        Self {
            detect_mm: config.detect_mm,
        }
    }

    /// Whether the proximity sensor should be sampled this tick
    ///
    /// Suppressed while the gate is operating and during the cooldown
    /// after it closes, so one car rolling past cannot re-trigger.
    pub fn should_sample(&self, gate: &GateController, now: Instant) -> bool {
        gate.entry_allowed(now)
    }

    /// Judge one distance reading
    pub fn evaluate(&self, distance_mm: u16, slot_free: bool) -> AdmissionDecision {
        if distance_mm > self.detect_mm {
            AdmissionDecision::OutOfRange
        } else if slot_free {
            AdmissionDecision::Admit
        } else {
            AdmissionDecision::Denied
        }
    }
}
