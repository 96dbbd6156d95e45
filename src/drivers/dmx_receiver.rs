//! DMX-512 universe buffer with start-address windowing.
//!
//! Holds the most recent value of every slot in the universe and maps
//! this device's relative channel indices through a 1-based start
//! address, the way a DMX slave fixture patches itself into a rig
//! (e.g. start address 501 with three channels listens to slots
//! 501–503).
//!
//! The buffer is transport-agnostic: on hardware the UART receive path
//! calls [`ingest_frame`] with each decoded frame; on host, tests and
//! the simulation loop poke values with [`set_channel_value`].
//!
//! [`ingest_frame`]: DmxReceiver::ingest_frame
//! [`set_channel_value`]: DmxReceiver::set_channel_value

use crate::config::DMX_UNIVERSE_SIZE;
use crate::error::DmxError;

/// Start code of a standard dimmer-data DMX frame. Frames carrying any
/// other start code (RDM, text packets) are not for this device.
pub const DMX_START_CODE: u8 = 0x00;

#[derive(Debug)]
pub struct DmxReceiver {
    universe: [u8; DMX_UNIVERSE_SIZE],
    /// 1-based slot of this device's first channel.
    start_address: u16,
    /// Width of the address window (channels under control).
    channel_count: usize,
    frames_received: u32,
}

impl DmxReceiver {
    pub fn new(start_address: u16, channel_count: usize) -> Result<Self, DmxError> {
        let mut rx = Self {
            universe: [0; DMX_UNIVERSE_SIZE],
            start_address: 1,
            channel_count,
            frames_received: 0,
        };
        rx.set_start_address(start_address)?;
        Ok(rx)
    }

    /// Move the address window. Rejected if any channel would fall
    /// outside slots 1–512.
    pub fn set_start_address(&mut self, addr: u16) -> Result<(), DmxError> {
        let last = addr as usize + self.channel_count.saturating_sub(1);
        if addr == 0 || last > DMX_UNIVERSE_SIZE {
            return Err(DmxError::AddressOutOfRange);
        }
        self.start_address = addr;
        Ok(())
    }

    /// Raw value of the channel at `offset` within the window.
    /// Offsets outside the window read as 0.
    pub fn channel_value(&self, offset: usize) -> u8 {
        if offset >= self.channel_count {
            return 0;
        }
        self.universe[self.start_address as usize - 1 + offset]
    }

    /// Accept one decoded DMX frame (slot values, start code stripped).
    /// Short frames update only the slots they carry; long frames are
    /// truncated to the universe.
    pub fn ingest_frame(&mut self, slots: &[u8]) {
        let n = slots.len().min(DMX_UNIVERSE_SIZE);
        self.universe[..n].copy_from_slice(&slots[..n]);
        self.frames_received = self.frames_received.wrapping_add(1);
    }

    /// Poke one window-relative channel value directly (simulation and
    /// tests; bypasses the frame path).
    pub fn set_channel_value(&mut self, offset: usize, value: u8) {
        if offset >= self.channel_count {
            return;
        }
        self.universe[self.start_address as usize - 1 + offset] = value;
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn frames_received(&self) -> u32 {
        self.frames_received
    }
}
