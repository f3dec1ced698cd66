//! Ticketing ledger
//!
//! The [`ParkingManager`] owns all logical lot state: the slot table, open
//! and closed tickets, and the ticket id pool. It is the only place slot
//! occupancy and billing are mutated.
//!
//! Id pool invariant: the free ids and the ids of open tickets are
//! disjoint and together cover `1..=slot_count` exactly once.

pub mod slot;
pub mod ticket;

pub use slot::{Slot, SlotId};
pub use ticket::Ticket;

use heapless::{Deque, Vec};

use crate::config::{ParkingConfig, MAX_SLOTS};
use crate::status::{SlotStatus, StatusSnapshot};
use crate::time::Instant;

/// Closed tickets retained in memory (dashboard shows the most recent ten)
pub const CLOSED_HISTORY: usize = 16;

/// Ticketing ledger for the whole lot
#[derive(Debug)]
pub struct ParkingManager {
    config: ParkingConfig,
    slots: Vec<Slot, MAX_SLOTS>,
    open_tickets: Vec<Ticket, MAX_SLOTS>,
    closed_tickets: Deque<Ticket, CLOSED_HISTORY>,
    /// Unused ticket ids, kept sorted ascending so allocation is lowest-first
    available_ids: Vec<u8, MAX_SLOTS>,
    /// Per-slot timestamp of the last occupancy change (dashboard highlight)
    recently_changed: Vec<Option<Instant>, MAX_SLOTS>,
}

impl ParkingManager {
    /// Create a ledger with all slots free and all ids available
    pub fn new(config: ParkingConfig) -> Self {
        let count = (config.slot_count as usize).min(MAX_SLOTS);
        let mut slots = Vec::new();
        let mut available_ids = Vec::new();
        let mut recently_changed = Vec::new();
        for i in 0..count {
            let _ = slots.push(Slot::new(SlotId::new(i as u8)));
            let _ = available_ids.push(i as u8 + 1);
            let _ = recently_changed.push(None);
        }
        Self {
            config,
            slots,
            open_tickets: Vec::new(),
            closed_tickets: Deque::new(),
            available_ids,
            recently_changed,
        }
    }

    /// Number of slots in the lot
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of free slots
    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_occupied()).count()
    }

    /// Whether at least one slot is free
    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|s| !s.is_occupied())
    }

    /// Whether the given slot is currently occupied
    pub fn slot_occupied(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_occupied)
    }

    /// Occupy a slot: allocate the lowest free ticket id and open a ticket
    ///
    /// Returns the assigned ticket id, or `None` if the slot is already
    /// occupied or no id is available. Denials change no state.
    pub fn occupy(&mut self, index: usize, now: Instant) -> Option<u8> {
        let slot = self.slots.get_mut(index)?;
        if slot.is_occupied() || self.available_ids.is_empty() {
            return None;
        }
        let id = self.available_ids.remove(0);
        slot.assign(id, now);
        let ticket = Ticket::open(id, slot.id(), now);
        // Capacity matches the id pool, push cannot fail
        let _ = self.open_tickets.push(ticket);
        self.recently_changed[index] = Some(now);
        Some(id)
    }

    /// Release a slot: close its ticket, bill it, and recycle the id
    ///
    /// Returns the closed ticket, or `None` if the slot is not occupied.
    pub fn release(&mut self, index: usize, now: Instant) -> Option<Ticket> {
        let slot = self.slots.get_mut(index)?;
        let id = slot.ticket_id()?;
        let pos = self.open_tickets.iter().position(|t| t.id == id)?;
        let mut ticket = self.open_tickets.remove(pos);
        ticket.close(now, self.config.fee_cents_per_min);
        slot.clear();
        self.recently_changed[index] = Some(now);
        self.return_id(id);
        if self.closed_tickets.is_full() {
            let _ = self.closed_tickets.pop_back();
        }
        let _ = self.closed_tickets.push_front(ticket.clone());
        Some(ticket)
    }

    /// Put an id back into the pool, keeping it sorted ascending
    fn return_id(&mut self, id: u8) {
        if self.available_ids.contains(&id) {
            return;
        }
        let pos = self
            .available_ids
            .iter()
            .position(|&i| i > id)
            .unwrap_or(self.available_ids.len());
        let _ = self.available_ids.insert(pos, id);
    }

    /// Drop recently-changed marks older than the highlight window
    pub fn purge_recent(&mut self, now: Instant) {
        for mark in self.recently_changed.iter_mut() {
            if let Some(ts) = *mark {
                if now.since(ts) > self.config.recent_highlight_ms {
                    *mark = None;
                }
            }
        }
    }

    /// Read-only status snapshot for the dashboard and LCD
    ///
    /// Never mutates ledger state; elapsed times are computed on demand.
    pub fn status(&self, now: Instant) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot {
            total: self.slots.len() as u8,
            free: self.free_count() as u8,
            occupied: (self.slots.len() - self.free_count()) as u8,
            slots: Vec::new(),
            open_tickets: self.open_tickets.clone(),
            recent_closed: Vec::new(),
        };
        for (i, slot) in self.slots.iter().enumerate() {
            let _ = snapshot.slots.push(SlotStatus {
                id: slot.id(),
                occupied: slot.is_occupied(),
                ticket_id: slot.ticket_id(),
                elapsed_min_x10: slot.occupied_since().map(|t| now.since(t) / 6_000),
                recently_changed: self.recently_changed[i].is_some(),
            });
        }
        for ticket in self.closed_tickets.iter() {
            if snapshot.recent_closed.push(ticket.clone()).is_err() {
                break;
            }
        }
        snapshot
    }

    /// Free ticket ids, lowest first (test and diagnostic use)
    pub fn available_ids(&self) -> &[u8] {
        &self.available_ids
    }

    /// Currently open tickets
    pub fn open_tickets(&self) -> &[Ticket] {
        &self.open_tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> ParkingManager {
        ParkingManager::new(ParkingConfig::default())
    }

    #[test]
    fn test_new_ledger_all_free() {
        let m = ledger();
        assert_eq!(m.slot_count(), 3);
        assert_eq!(m.free_count(), 3);
        assert_eq!(m.available_ids(), &[1, 2, 3]);
    }

    #[test]
    fn test_occupy_assigns_lowest_id() {
        let mut m = ledger();
        let now = Instant::from_ms(0);
        assert_eq!(m.occupy(1, now), Some(1));
        assert_eq!(m.occupy(0, now), Some(2));
        assert_eq!(m.available_ids(), &[3]);
        assert!(m.slot_occupied(0));
        assert!(m.slot_occupied(1));
        assert!(!m.slot_occupied(2));
    }

    #[test]
    fn test_occupy_occupied_slot_is_denied() {
        let mut m = ledger();
        let now = Instant::from_ms(0);
        assert_eq!(m.occupy(0, now), Some(1));
        assert_eq!(m.occupy(0, now), None);
        assert_eq!(m.available_ids(), &[2, 3]);
        assert_eq!(m.open_tickets().len(), 1);
    }

    #[test]
    fn test_release_bills_and_recycles_id() {
        let mut m = ledger();
        m.occupy(2, Instant::from_ms(0));
        let ticket = m.release(2, Instant::from_ms(90_000)).unwrap();
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.duration_min, Some(2));
        assert_eq!(ticket.fee_cents, Some(100));
        assert!(!m.slot_occupied(2));
        assert_eq!(m.available_ids(), &[1, 2, 3]);
        assert!(m.open_tickets().is_empty());
    }

    #[test]
    fn test_release_vacant_slot_is_denied() {
        let mut m = ledger();
        assert!(m.release(0, Instant::from_ms(100)).is_none());
        assert_eq!(m.available_ids(), &[1, 2, 3]);
    }

    #[test]
    fn test_recycled_id_is_reused_lowest_first() {
        let mut m = ledger();
        let now = Instant::from_ms(0);
        m.occupy(0, now);
        m.occupy(1, now);
        m.release(0, now.plus_ms(1000));
        // Id 1 went back to the pool and is handed out again before 3
        assert_eq!(m.occupy(2, now.plus_ms(2000)), Some(1));
    }

    #[test]
    fn test_status_counts_and_elapsed() {
        let mut m = ledger();
        m.occupy(1, Instant::from_ms(0));
        let s = m.status(Instant::from_ms(90_000));
        assert_eq!(s.total, 3);
        assert_eq!(s.free, 2);
        assert_eq!(s.occupied, 1);
        assert!(!s.slots[0].occupied);
        assert!(s.slots[1].occupied);
        assert_eq!(s.slots[1].ticket_id, Some(1));
        // 90s = 1.5 min
        assert_eq!(s.slots[1].elapsed_min_x10, Some(15));
    }

    #[test]
    fn test_status_does_not_mutate() {
        let mut m = ledger();
        m.occupy(0, Instant::from_ms(0));
        let _ = m.status(Instant::from_ms(1000));
        let _ = m.status(Instant::from_ms(2000));
        assert_eq!(m.open_tickets().len(), 1);
        assert_eq!(m.available_ids(), &[2, 3]);
    }

    #[test]
    fn test_recent_highlight_purged_after_window() {
        let mut m = ledger();
        let now = Instant::from_ms(0);
        m.occupy(0, now);
        assert!(m.status(now).slots[0].recently_changed);

        m.purge_recent(now.plus_ms(59_000));
        assert!(m.status(now.plus_ms(59_000)).slots[0].recently_changed);

        m.purge_recent(now.plus_ms(61_000));
        assert!(!m.status(now.plus_ms(61_000)).slots[0].recently_changed);
    }

    #[test]
    fn test_closed_history_most_recent_first() {
        let mut m = ledger();
        let now = Instant::from_ms(0);
        m.occupy(0, now);
        m.release(0, now.plus_ms(1000));
        m.occupy(1, now.plus_ms(2000));
        m.release(1, now.plus_ms(3000));
        let s = m.status(now.plus_ms(4000));
        assert_eq!(s.recent_closed.len(), 2);
        assert_eq!(s.recent_closed[0].slot, SlotId::new(1));
        assert_eq!(s.recent_closed[1].slot, SlotId::new(0));
    }

    #[test]
    fn test_closed_history_bounded() {
        let mut m = ledger();
        let mut now = Instant::from_ms(0);
        for _ in 0..CLOSED_HISTORY + 5 {
            m.occupy(0, now);
            now = now.plus_ms(1000);
            m.release(0, now);
            now = now.plus_ms(1000);
        }
        let s = m.status(now);
        assert!(s.recent_closed.len() <= crate::status::RECENT_CLOSED_SHOWN);
    }
}
