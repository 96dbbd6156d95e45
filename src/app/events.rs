//! Outbound application events.
//!
//! The [`SwitchService`](super::service::SwitchService) emits these
//! through the [`EventSink`](super::ports::EventSink) port on every
//! state transition. Diagnostics are an observer concern, not core
//! behavior: adapters on the other side decide what to do with them
//! (serial log, debug console, a future telemetry channel).

use crate::dmx::SwitchPosition;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service started and swept all servos to neutral.
    Started { channels: usize },

    /// A throw was admitted and the servo commanded to an engaged angle.
    Moved {
        channel: usize,
        position: SwitchPosition,
        angle_deg: u8,
    },

    /// The dwell deadline passed and the servo was commanded back to
    /// the neutral angle.
    ReturnedToNeutral { channel: usize },

    /// The post-return cooldown elapsed; the channel accepts moves again.
    DwellCleared { channel: usize },

    /// The DMX address window was moved at runtime.
    StartAddressChanged(u16),

    /// A runtime configuration update was applied.
    ConfigUpdated,
}
