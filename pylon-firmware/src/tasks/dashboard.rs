//! Dashboard serving task
//!
//! Serves the HTML status page over the buffered UART. The serial
//! bridge on the other end turns each incoming HTTP request into a
//! single request byte and relays the response back to the browser.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use pylon_dashboard::{render_http, Page};

use crate::channels::SNAPSHOT;

/// Dashboard task: one rendered page per request byte
#[embassy_executor::task]
pub async fn dashboard_task(
    mut rx: BufferedUartRx<'static, UART0>,
    mut tx: BufferedUartTx<'static, UART0>,
) {
    info!("Dashboard task started");

    let mut snapshots = SNAPSHOT.receiver().unwrap();
    let mut latest = snapshots.get().await;
    let mut request = [0u8; 1];

    loop {
        match rx.read(&mut request).await {
            Ok(0) => continue,
            Ok(_) => {}
            Err(e) => {
                warn!("Dashboard request read failed: {:?}", e);
                continue;
            }
        }

        if let Some(snapshot) = snapshots.try_changed() {
            latest = snapshot;
        }

        let mut page = Page::new();
        if render_http(&latest, &mut page).is_err() {
            // Sized for a full lot plus history; reaching here means the
            // page layout grew past PAGE_LEN
            warn!("Dashboard page overflowed its buffer");
            continue;
        }

        if let Err(e) = tx.write_all(page.as_bytes()).await {
            warn!("Dashboard response write failed: {:?}", e);
        } else {
            trace!("Dashboard page served ({} bytes)", page.len());
        }
    }
}
