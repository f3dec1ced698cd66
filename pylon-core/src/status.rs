//! Read-only status snapshot types
//!
//! A [`StatusSnapshot`] is a self-contained copy of the lot's state taken
//! at one instant. Consumers (dashboard renderer, LCD task) hold it
//! without touching the ledger.

use heapless::Vec;

use crate::config::MAX_SLOTS;
use crate::ledger::{SlotId, Ticket};

/// Closed tickets included in a snapshot
pub const RECENT_CLOSED_SHOWN: usize = 10;

/// Per-slot view
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotStatus {
    pub id: SlotId,
    pub occupied: bool,
    pub ticket_id: Option<u8>,
    /// Occupancy time so far, in tenths of a minute
    pub elapsed_min_x10: Option<u32>,
    /// Occupancy changed within the highlight window (dashboard flash)
    pub recently_changed: bool,
}

/// Whole-lot view at one instant
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    pub total: u8,
    pub free: u8,
    pub occupied: u8,
    pub slots: Vec<SlotStatus, MAX_SLOTS>,
    pub open_tickets: Vec<Ticket, MAX_SLOTS>,
    /// Most recent first
    pub recent_closed: Vec<Ticket, RECENT_CLOSED_SHOWN>,
}

impl StatusSnapshot {
    /// Whether the lot has no free slot
    pub fn is_full(&self) -> bool {
        self.free == 0
    }
}
