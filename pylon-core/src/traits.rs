//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and
//! hardware-specific implementations. The core never touches pins or
//! buses directly; the firmware crate wires concrete drivers in.

/// Forward-facing range sensor at the entry gate
pub trait ProximitySensor {
    /// Measure distance to the nearest obstacle in millimeters
    ///
    /// A failed measurement (no echo within the timeout) must map to
    /// [`crate::config::NO_ECHO_MM`], never to an error: a missing echo
    /// is an ordinary "nothing there" reading.
    fn read_distance_mm(&mut self) -> u16;
}

/// Per-slot presence sensor (IR break beam or reflective sensor)
pub trait BaySensor {
    /// Raw, un-debounced "beam blocked" reading
    fn is_blocked(&mut self) -> bool;
}

/// Barrier servo output
pub trait GateServo {
    /// Command the barrier to the given angle (0 = closed, clamped by caller)
    fn set_angle(&mut self, degrees: u8);
}

/// Simple indicator LED output
pub trait StatusLed {
    /// Turn the LED on or off
    fn set_on(&mut self, on: bool);
}

/// Errors that can occur when sending a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyError {
    /// The transport link is down
    LinkDown,
    /// The remote end rejected the message
    Rejected,
}

/// Receipt notification transport
///
/// Sends are fire-and-forget from the ledger's point of view: a failed
/// send is logged and dropped, it never rolls back a closed ticket.
pub trait Notifier {
    /// Send a formatted receipt message
    fn send(&mut self, text: &str) -> Result<(), NotifyError>;
}
