//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::watch::Watch;

use pylon_core::receipt::Receipt;
use pylon_core::status::StatusSnapshot;

/// Snapshot consumers: dashboard task and LCD task
const SNAPSHOT_CONSUMERS: usize = 2;

/// Queue depth for outbound receipts
const RECEIPT_QUEUE_SIZE: usize = 4;

/// Latest lot status, published by the control task
///
/// Consumers only ever see the most recent snapshot; stale intermediate
/// states are overwritten, which is exactly right for a status display.
pub static SNAPSHOT: Watch<CriticalSectionRawMutex, StatusSnapshot, SNAPSHOT_CONSUMERS> =
    Watch::new();

/// Formatted receipts awaiting transmission to the messaging bridge
///
/// Bounded: when the link is down long enough to fill the queue, new
/// receipts are dropped with a warning rather than stalling the control
/// loop.
pub static RECEIPTS: Channel<CriticalSectionRawMutex, Receipt, RECEIPT_QUEUE_SIZE> = Channel::new();
