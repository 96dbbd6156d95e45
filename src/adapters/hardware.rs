//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`DmxReceiver`] and the [`ServoDriver`], exposing them
//! through [`DmxPort`] and [`ServoPort`]. This is the only module in
//! the system the service talks to for I/O. On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{DmxPort, ServoPort};
use crate::drivers::dmx_receiver::DmxReceiver;
use crate::drivers::servo::ServoDriver;
use crate::error::DmxError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    dmx: DmxReceiver,
    servos: ServoDriver,
}

impl HardwareAdapter {
    pub fn new(dmx: DmxReceiver, servos: ServoDriver) -> Self {
        Self { dmx, servos }
    }

    /// Feed one decoded DMX frame from the UART receive path.
    pub fn ingest_frame(&mut self, slots: &[u8]) {
        self.dmx.ingest_frame(slots);
    }

    /// Window-relative channel poke for host simulation.
    pub fn set_channel_value(&mut self, offset: usize, value: u8) {
        self.dmx.set_channel_value(offset, value);
    }

    /// Last commanded angle for a servo channel (diagnostics).
    pub fn servo_angle(&self, channel: usize) -> Option<u8> {
        self.servos.angle(channel)
    }
}

// ── DmxPort implementation ────────────────────────────────────

impl DmxPort for HardwareAdapter {
    fn read_channel(&self, channel: usize) -> u8 {
        self.dmx.channel_value(channel)
    }

    fn set_start_address(&mut self, addr: u16) -> Result<(), DmxError> {
        self.dmx.set_start_address(addr)
    }
}

// ── ServoPort implementation ──────────────────────────────────

impl ServoPort for HardwareAdapter {
    fn write_angle(&mut self, channel: usize, degrees: u8) {
        self.servos.write(channel, degrees);
    }
}
