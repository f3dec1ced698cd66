//! Receipt notification task
//!
//! Forwards formatted receipts over UART1 to the external messaging
//! bridge. Sends are fire-and-forget: a failed write is logged and the
//! receipt dropped, the closed ticket already lives in the ledger.

use defmt::*;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Blocking, UartTx};

use pylon_core::traits::{Notifier, NotifyError};

use crate::channels::RECEIPTS;

/// Serial link to the messaging bridge
///
/// A receipt ends with a newline, so the extra terminator leaves a blank
/// line between messages; the bridge splits on it.
pub struct BridgeLink {
    tx: UartTx<'static, UART1, Blocking>,
}

impl BridgeLink {
    pub fn new(tx: UartTx<'static, UART1, Blocking>) -> Self {
        Self { tx }
    }
}

impl Notifier for BridgeLink {
    fn send(&mut self, text: &str) -> Result<(), NotifyError> {
        self.tx
            .blocking_write(text.as_bytes())
            .map_err(|_| NotifyError::LinkDown)?;
        self.tx
            .blocking_write(b"\n")
            .map_err(|_| NotifyError::LinkDown)?;
        Ok(())
    }
}

/// Notifier task: drains the receipt queue into the bridge link
#[embassy_executor::task]
pub async fn notifier_task(mut link: BridgeLink) {
    info!("Notifier task started");

    loop {
        let receipt = RECEIPTS.receive().await;
        match link.send(&receipt) {
            Ok(()) => trace!("Receipt forwarded to bridge"),
            Err(e) => warn!("Receipt dropped: {}", e),
        }
    }
}
