//! LCD status task
//!
//! Mirrors the free-bay count onto the 16x2 panel at the entrance.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use heapless::String;

use pylon_drivers::display::Lcd1602;

use crate::channels::SNAPSHOT;

pub type Panel = Lcd1602<I2c<'static, I2C0, Blocking>, Delay>;

/// LCD task: redraws the panel whenever the lot status changes
#[embassy_executor::task]
pub async fn lcd_task(mut panel: Panel) {
    info!("LCD task started");

    let mut snapshots = SNAPSHOT.receiver().unwrap();

    loop {
        let snapshot = snapshots.changed().await;

        let mut top: String<16> = String::new();
        let mut bottom: String<16> = String::new();
        let _ = write!(top, "FREE: {}/{}", snapshot.free, snapshot.total);
        if snapshot.is_full() {
            let _ = bottom.push_str("PARKING FULL");
        } else {
            let _ = bottom.push_str("Welcome");
        }

        if write_lines(&mut panel, &top, &bottom).is_err() {
            warn!("LCD write failed, panel unreachable");
        }
    }
}

fn write_lines(panel: &mut Panel, top: &str, bottom: &str) -> Result<(), embassy_rp::i2c::Error> {
    panel.clear()?;
    panel.set_cursor(0, 0)?;
    panel.print(top)?;
    panel.set_cursor(0, 1)?;
    panel.print(bottom)
}
