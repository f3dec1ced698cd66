//! Configuration type definitions
//!
//! All values are fixed at build time; nothing here is runtime-reloadable.
//! Defaults match the deployed lot: three bays, one gate, $0.50 per minute.

/// Hard cap on slot count (sizes all per-slot collections)
pub const MAX_SLOTS: usize = 8;

/// Sentinel distance reported when the ultrasonic sensor gets no echo
pub const NO_ECHO_MM: u16 = 9_990;

/// Parking lot and billing configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParkingConfig {
    /// Number of physical bays (clamped to [`MAX_SLOTS`])
    pub slot_count: u8,
    /// How long an IR beam must stay blocked before a slot counts as occupied
    pub entry_debounce_ms: u32,
    /// How long an IR beam must stay clear before an occupied slot counts as vacated
    pub exit_grace_ms: u32,
    /// Billing rate, in cents per started minute
    pub fee_cents_per_min: u32,
    /// How long a slot stays flagged as recently changed on the dashboard
    pub recent_highlight_ms: u32,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            slot_count: 3,
            entry_debounce_ms: 300,
            exit_grace_ms: 1000,
            fee_cents_per_min: 50,
            recent_highlight_ms: 60_000,
        }
    }
}

/// Entry admission configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdmissionConfig {
    /// A vehicle closer than this to the gate counts as arriving
    pub detect_mm: u16,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self { detect_mm: 100 }
    }
}

/// Gate actuator configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateConfig {
    /// Fully-open barrier angle in degrees
    pub open_angle: u8,
    /// Degrees moved per ramp step
    pub step_deg: u8,
    /// Minimum time between ramp steps (servo slew limit)
    pub step_interval_ms: u32,
    /// How long the gate holds open before auto-closing
    pub open_hold_ms: u32,
    /// Entry detection suppression window after the gate closes
    pub cooldown_ms: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            open_angle: 90,
            step_deg: 50,
            step_interval_ms: 20,
            open_hold_ms: 3000,
            cooldown_ms: 5000,
        }
    }
}
