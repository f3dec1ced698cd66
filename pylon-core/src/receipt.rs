//! Receipt formatting
//!
//! Builds the text receipt sent over the notification link when a ticket
//! closes. The transport (serial bridge to the messaging service) is a
//! collaborator; this module only produces the message body.

use core::fmt::Write;

use heapless::String;

use crate::ledger::Ticket;
use crate::time::Instant;

/// Maximum receipt length
pub const RECEIPT_LEN: usize = 192;

/// A formatted receipt message
pub type Receipt = String<RECEIPT_LEN>;

/// Format a closed ticket into a receipt
///
/// Timestamps are uptime-relative; the bridge on the other end of the
/// link maps them to wall-clock time.
pub fn format_receipt(ticket: &Ticket) -> Receipt {
    let mut out = Receipt::new();
    let duration = ticket.duration_min.unwrap_or(0);
    let fee = ticket.fee_cents.unwrap_or(0);
    let exit_ms = ticket.exit.map(Instant::as_ms).unwrap_or(0);
    // Receipt is sized for the worst case, the write cannot truncate
    let _ = write!(
        out,
        "Ticket CLOSED (ID: {})\nSlot: {}\nEntry: +{}ms\nExit: +{}ms\nDuration: {} min\nFee: ${}.{:02}\n",
        ticket.id,
        ticket.slot,
        ticket.entry.as_ms(),
        exit_ms,
        duration,
        fee / 100,
        fee % 100,
    );
    out
}
