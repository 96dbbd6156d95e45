//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial
//! console, debug tooling) that the
//! [`SwitchService`](super::service::SwitchService) interprets and acts
//! upon. The DMX value stream itself is not a command — it flows in
//! through [`DmxPort`](super::ports::DmxPort) every tick.

use crate::config::SystemConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Move the DMX address window (1-based slot of the first channel).
    SetStartAddress(u16),

    /// Hot-reload configuration (angles and dwell time apply live; a
    /// channel-count change requires a restart).
    UpdateConfig(SystemConfig),

    /// Force one channel's servo to neutral and clear its state
    /// machine (debug / testing only). Out-of-range channels are
    /// ignored.
    ForceNeutral(usize),
}
