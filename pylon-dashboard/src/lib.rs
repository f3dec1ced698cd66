//! Dashboard renderer
//!
//! Pure functions from a [`StatusSnapshot`] to the HTML status page and
//! its HTTP framing. Nothing here mutates lot state; the serving task
//! calls [`render_http`] with whatever snapshot it last received and
//! ships the bytes.

#![no_std]
#![deny(unsafe_code)]

use core::fmt::{self, Write};

use heapless::String;

use pylon_core::ledger::Ticket;
use pylon_core::status::StatusSnapshot;

/// Rendered page buffer size
pub const PAGE_LEN: usize = 4096;

/// A rendered response
pub type Page = String<PAGE_LEN>;

/// Browser auto-refresh interval in seconds
pub const REFRESH_SECONDS: u8 = 3;

/// Render the full HTTP response (header + page) for one snapshot
pub fn render_http(status: &StatusSnapshot, out: &mut Page) -> fmt::Result {
    out.write_str("HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n")?;
    render_page(status, out)
}

/// Render the HTML status page for one snapshot
pub fn render_page(status: &StatusSnapshot, out: &mut Page) -> fmt::Result {
    write!(
        out,
        "<html>\n<head>\n<title>Pylon Parking Dashboard</title>\n\
         <meta http-equiv=\"refresh\" content=\"{REFRESH_SECONDS}\">\n\
         <style>\n\
         body {{ font-family: Arial,sans-serif; margin:20px; background:#f0f0f8; color:#222; }}\n\
         .card {{ border:1px solid #ccc; padding:10px; margin-bottom:15px; border-radius:8px; background:#fff; }}\n\
         h2 {{ color:#3333aa; }}\n\
         table {{ width:100%; border-collapse: collapse; }}\n\
         th,td {{ padding:8px; border-bottom:1px solid #ccc; text-align:left; }}\n\
         th {{ background:#3333aa; color:#fff; }}\n\
         tr.free {{ background:#ddffdd; }}\n\
         tr.occupied {{ background:#ffdddd; }}\n\
         tr.flash {{ animation: flash-bg 1s ease-in-out infinite; background:#ffaaaa; }}\n\
         @keyframes flash-bg {{0%{{background:#ffaaaa;}}50%{{background:#ff5555;}}100%{{background:#ffaaaa;}}}}\n\
         </style>\n</head>\n<body>\n<h2>Pylon Parking Dashboard</h2>\n"
    )?;

    write!(
        out,
        "<div class=\"card\">\n<b>Total Slots:</b> {} &nbsp; <b>Free:</b> {} &nbsp; <b>Occupied:</b> {}\n</div>\n",
        status.total, status.free, status.occupied
    )?;

    out.write_str(
        "<div class=\"card\">\n<h3>Current Slots Status</h3>\n<table>\n\
         <tr><th>Slot</th><th>Status</th><th>ID</th><th>Elapsed</th></tr>\n",
    )?;
    for slot in &status.slots {
        let row_class = if !slot.occupied {
            "free"
        } else if slot.recently_changed {
            "flash"
        } else {
            "occupied"
        };
        write!(
            out,
            "<tr class='{}'><td>{}</td><td>{}</td><td>",
            row_class,
            slot.id,
            if slot.occupied { "Occupied" } else { "Free" }
        )?;
        match slot.ticket_id {
            Some(id) => write!(out, "{id}")?,
            None => out.write_str("-")?,
        }
        out.write_str("</td><td>")?;
        match slot.elapsed_min_x10 {
            Some(v) if slot.occupied => write!(out, "{}.{} min", v / 10, v % 10)?,
            _ => out.write_str("-")?,
        }
        out.write_str("</td></tr>\n")?;
    }
    out.write_str("</table>\n</div>\n")?;

    out.write_str(
        "<div class=\"card\">\n<h3>Recent Departures</h3>\n<table>\n\
         <tr><th>Ticket ID</th><th>Slot</th><th>Exit</th><th>Fee ($)</th></tr>\n",
    )?;
    for ticket in &status.recent_closed {
        render_departure_row(ticket, out)?;
    }
    out.write_str("</table>\n</div>\n</body>\n</html>\n")
}

fn render_departure_row(ticket: &Ticket, out: &mut Page) -> fmt::Result {
    let fee = ticket.fee_cents.unwrap_or(0);
    write!(
        out,
        "<tr style='background:#eeeeff'><td>{}</td><td>{}</td><td>+{}ms</td><td>{}.{:02}</td></tr>\n",
        ticket.id,
        ticket.slot,
        ticket.exit.map(|t| t.as_ms()).unwrap_or(0),
        fee / 100,
        fee % 100,
    )
}
