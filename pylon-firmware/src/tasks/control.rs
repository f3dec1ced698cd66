//! Control loop task
//!
//! The single 50ms loop that owns all lot state: gate ramp, entry
//! admission, per-slot occupancy and the ticketing ledger. Everything
//! else in the firmware is a read-only consumer of what this task
//! publishes.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Duration, Ticker};
use heapless::Vec;

use pylon_core::admission::{AdmissionDecision, EntryAdmission};
use pylon_core::config::{AdmissionConfig, GateConfig, ParkingConfig, MAX_SLOTS};
use pylon_core::gate::GateController;
use pylon_core::ledger::ParkingManager;
use pylon_core::occupancy::OccupancyEngine;
use pylon_core::receipt::format_receipt;
use pylon_core::time::Instant;
use pylon_core::traits::{BaySensor, GateServo, ProximitySensor, StatusLed};
use pylon_drivers::gpio::GpioLed;
use pylon_drivers::sensor::{Hcsr04, IrSensor};

use crate::channels::{RECEIPTS, SNAPSHOT};
use crate::hw::{BarrierServo, UptimeTimer};

/// Control loop period
pub const TICK_INTERVAL_MS: u32 = 50;

/// Snapshot republish period while nothing changes, keeps the elapsed
/// times on the dashboard moving
const SNAPSHOT_REFRESH_MS: u32 = 2000;

/// Physical bays wired to this board
pub const BAY_COUNT: usize = 3;

pub type EntrySensor = Hcsr04<Output<'static>, Input<'static>, Delay, UptimeTimer>;
pub type BayIr = IrSensor<Input<'static>>;

/// Control task: the whole lot state machine, one tick every 50ms
#[embassy_executor::task]
pub async fn control_task(
    mut entry_sensor: EntrySensor,
    mut bays: [BayIr; BAY_COUNT],
    mut servo: BarrierServo,
    mut gate_led: GpioLed<Output<'static>>,
    mut full_led: GpioLed<Output<'static>>,
) {
    info!("Control task started");

    let parking_config = ParkingConfig::default();
    let boot = embassy_time::Instant::now();
    let start = Instant::from_ms(0);

    let mut ledger = ParkingManager::new(parking_config.clone());
    let mut engine = OccupancyEngine::new(&parking_config, start);
    let mut gate = GateController::new(GateConfig::default(), start);
    let admission = EntryAdmission::new(&AdmissionConfig::default());

    servo.set_angle(0);

    let snapshot_tx = SNAPSHOT.sender();
    snapshot_tx.send(ledger.status(start));
    let mut last_snapshot_at = start;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        let now = Instant::from_ms(boot.elapsed().as_millis() as u32);

        // Gate ramp first so sensor work never delays a servo step
        if let Some(angle) = gate.tick(now) {
            servo.set_angle(angle);
        }
        gate_led.set_on(gate.is_operating());

        // Entry admission, suppressed while the gate moves or cools down
        if admission.should_sample(&gate, now) {
            let distance_mm = entry_sensor.read_distance_mm();
            match admission.evaluate(distance_mm, ledger.has_free_slot()) {
                AdmissionDecision::Admit => {
                    if gate.request_open(now) {
                        info!("Vehicle at gate ({}mm), opening", distance_mm);
                    }
                }
                AdmissionDecision::Denied => {
                    info!("Entry denied: parking full ({}mm)", distance_mm);
                }
                AdmissionDecision::OutOfRange => {}
            }
        }

        // Per-slot occupancy
        let mut readings: Vec<bool, MAX_SLOTS> = Vec::new();
        for bay in bays.iter_mut() {
            let _ = readings.push(bay.is_blocked());
        }
        let outcome = engine.scan(&readings, now, &mut ledger);

        for ticket in &outcome.closed {
            info!(
                "Ticket {} closed: bay S{}, {} min, {} cents",
                ticket.id,
                ticket.slot.number(),
                ticket.duration_min.unwrap_or(0),
                ticket.fee_cents.unwrap_or(0)
            );
            if RECEIPTS.try_send(format_receipt(ticket)).is_err() {
                warn!("Receipt queue full, dropping ticket {}", ticket.id);
            }
        }

        // A vacated bay lets the departing car out
        if outcome.exit_detected && gate.request_open(now) {
            info!("Exit detected, opening gate");
        }

        full_led.set_on(!ledger.has_free_slot());

        // Publish on change plus a periodic refresh
        if outcome.changed || now.since(last_snapshot_at) >= SNAPSHOT_REFRESH_MS {
            snapshot_tx.send(ledger.status(now));
            last_snapshot_at = now;
        }
    }
}
