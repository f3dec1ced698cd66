//! Board-agnostic core logic for the Pylon car park controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wraparound-safe millisecond clock arithmetic
//! - Hardware abstraction traits (proximity sensor, bay sensor, servo, LED)
//! - Debounce and occupancy engine for the per-slot IR sensors
//! - Ticketing ledger (slot assignment, billing, status snapshots)
//! - Entry admission logic
//! - Gate actuator state machine with bounded-rate servo ramp
//! - Receipt formatting for the notification link

#![no_std]
#![deny(unsafe_code)]

pub mod admission;
pub mod config;
pub mod gate;
pub mod ledger;
pub mod occupancy;
pub mod receipt;
pub mod status;
pub mod time;
pub mod traits;
