//! Slot identity and logical occupancy state

use crate::time::Instant;

/// Stable identifier for one physical parking bay
///
/// Zero-based internally; displays as the painted bay label ("S1", "S2", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(u8);

impl SlotId {
    /// Create from a zero-based index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based index into the slot table
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// One-based bay number as painted on the ground
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

impl core::fmt::Display for SlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "S{}", self.number())
    }
}

/// One physical parking bay
///
/// Invariant: `occupied`, `ticket_id` and `occupied_since` are set and
/// cleared together; a slot either has all three or none.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    id: SlotId,
    ticket_id: Option<u8>,
    occupied_since: Option<Instant>,
}

impl Slot {
    pub(crate) fn new(id: SlotId) -> Self {
        Self {
            id,
            ticket_id: None,
            occupied_since: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn is_occupied(&self) -> bool {
        self.ticket_id.is_some()
    }

    pub fn ticket_id(&self) -> Option<u8> {
        self.ticket_id
    }

    pub fn occupied_since(&self) -> Option<Instant> {
        self.occupied_since
    }

    pub(crate) fn assign(&mut self, ticket_id: u8, now: Instant) {
        self.ticket_id = Some(ticket_id);
        self.occupied_since = Some(now);
    }

    pub(crate) fn clear(&mut self) {
        self.ticket_id = None;
        self.occupied_since = None;
    }
}
