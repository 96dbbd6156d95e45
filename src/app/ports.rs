//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SwitchService (domain)
//! ```
//!
//! Driven adapters (DMX receiver, servo outputs, event sinks) implement
//! these traits. The [`SwitchService`](super::service::SwitchService)
//! consumes them via generics, so the domain core never touches
//! hardware directly.

use crate::error::DmxError;

// ───────────────────────────────────────────────────────────────
// DMX port (driven adapter: bus → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain polls this for channel values.
pub trait DmxPort {
    /// Current raw value (0–255) of the channel at the given offset
    /// within this device's address window. Offsets outside the window
    /// read as 0.
    fn read_channel(&self, channel: usize) -> u8;

    /// Move the device's address window (1-based DMX slot). Not a
    /// per-tick operation; rejected if the window would leave the
    /// universe.
    fn set_start_address(&mut self, addr: u16) -> Result<(), DmxError>;
}

// ───────────────────────────────────────────────────────────────
// Servo port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands servo angles through this.
pub trait ServoPort {
    /// Drive the servo for `channel` to `degrees` (0–180, clamped by
    /// the implementation). Out-of-range channels are a no-op.
    fn write_angle(&mut self, channel: usize, degrees: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log,
/// debug console, a future telemetry channel).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
