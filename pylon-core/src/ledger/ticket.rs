//! Ticket type and billing math

use crate::ledger::slot::SlotId;
use crate::time::Instant;

/// One billable parking session
///
/// Created the instant a slot becomes occupied, closed the instant it is
/// vacated. Once closed, a ticket is immutable and never reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticket {
    /// Small positive id, unique among open tickets, recycled after release
    pub id: u8,
    /// Slot this session occupies
    pub slot: SlotId,
    /// When the vehicle settled into the slot
    pub entry: Instant,
    /// When the vehicle left (set on close)
    pub exit: Option<Instant>,
    /// Billed duration in whole minutes, rounded up (set on close)
    pub duration_min: Option<u32>,
    /// Fee in cents (set on close)
    pub fee_cents: Option<u32>,
}

impl Ticket {
    /// Open a new ticket
    pub(crate) fn open(id: u8, slot: SlotId, entry: Instant) -> Self {
        Self {
            id,
            slot,
            entry,
            exit: None,
            duration_min: None,
            fee_cents: None,
        }
    }

    /// Close the ticket, computing duration and fee
    ///
    /// Duration rounds up to the next whole minute: a one-second stay
    /// bills as one minute. Deliberate operator-favoring policy.
    pub(crate) fn close(&mut self, exit: Instant, rate_cents_per_min: u32) {
        let elapsed_ms = exit.since(self.entry);
        let duration_min = elapsed_ms.div_ceil(60_000);
        self.exit = Some(exit);
        self.duration_min = Some(duration_min);
        self.fee_cents = Some(duration_min * rate_cents_per_min);
    }

    /// Whether this ticket has been closed
    pub fn is_closed(&self) -> bool {
        self.exit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_rounds_up() {
        let mut t = Ticket::open(1, SlotId::new(0), Instant::from_ms(0));
        t.close(Instant::from_ms(1000), 50);
        assert_eq!(t.duration_min, Some(1));
        assert_eq!(t.fee_cents, Some(50));
    }

    #[test]
    fn test_billing_exact_minute() {
        let mut t = Ticket::open(1, SlotId::new(0), Instant::from_ms(0));
        t.close(Instant::from_ms(60_000), 50);
        assert_eq!(t.duration_min, Some(1));
        assert_eq!(t.fee_cents, Some(50));
    }

    #[test]
    fn test_billing_just_over_minute() {
        let mut t = Ticket::open(1, SlotId::new(0), Instant::from_ms(0));
        t.close(Instant::from_ms(60_001), 50);
        assert_eq!(t.duration_min, Some(2));
        assert_eq!(t.fee_cents, Some(100));
    }

    #[test]
    fn test_zero_length_stay() {
        let mut t = Ticket::open(1, SlotId::new(0), Instant::from_ms(500));
        t.close(Instant::from_ms(500), 50);
        assert_eq!(t.duration_min, Some(0));
        assert_eq!(t.fee_cents, Some(0));
    }

    #[test]
    fn test_billing_across_counter_wrap() {
        let entry = Instant::from_ms(u32::MAX - 29_999);
        let mut t = Ticket::open(1, SlotId::new(0), entry);
        t.close(entry.plus_ms(90_000), 50);
        assert_eq!(t.duration_min, Some(2));
        assert_eq!(t.fee_cents, Some(100));
    }
}
