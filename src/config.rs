//! System configuration parameters
//!
//! All tunable parameters for the DmxSwitch controller.
//! Values can be overridden at runtime via [`AppCommand::UpdateConfig`]
//! (e.g. from a serial debug channel).
//!
//! [`AppCommand::UpdateConfig`]: crate::app::commands::AppCommand::UpdateConfig

use serde::{Deserialize, Serialize};

/// Upper bound on controlled channels, fixed by the ESP32-S3 LEDC
/// peripheral (eight PWM channels — one per servo).
pub const MAX_CHANNELS: usize = 8;

/// Number of addressable slots in one DMX-512 universe.
pub const DMX_UNIVERSE_SIZE: usize = 512;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- DMX ---
    /// Number of consecutive DMX channels (and servos) under control.
    pub channel_count: usize,
    /// First DMX slot of this device's window (1-based, 1–512).
    pub dmx_start_address: u16,

    // --- Switch timing ---
    /// Dwell time in milliseconds: how long a servo holds an engaged
    /// position before returning to neutral, and how long the return
    /// transit is protected before the next move is admitted.
    pub move_delay_ms: u32,

    // --- Servo angles ---
    /// Rest angle commanded between throws (degrees, 0–180).
    pub neutral_angle_deg: u8,
    /// Angle for the On throw (degrees, 0–180).
    pub on_angle_deg: u8,
    /// Angle for the Off throw (degrees, 0–180).
    pub off_angle_deg: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // DMX
            channel_count: 3,
            dmx_start_address: 501,

            // Switch timing
            move_delay_ms: 2500,

            // Servo angles
            neutral_angle_deg: 90,
            on_angle_deg: 0,
            off_angle_deg: 180,

            // Timing — 50 Hz, one tick per servo PWM frame
            control_loop_interval_ms: 20,
        }
    }
}

impl SystemConfig {
    /// Range-check every field. Returns the offending constraint on
    /// failure so runtime updates can be rejected with a reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.channel_count == 0 || self.channel_count > MAX_CHANNELS {
            return Err("channel_count must be 1..=MAX_CHANNELS");
        }
        let last_slot = self.dmx_start_address as usize + self.channel_count - 1;
        if self.dmx_start_address == 0 || last_slot > DMX_UNIVERSE_SIZE {
            return Err("DMX window must fit within slots 1..=512");
        }
        if self.move_delay_ms == 0 {
            return Err("move_delay_ms must be non-zero");
        }
        if self.neutral_angle_deg > 180 || self.on_angle_deg > 180 || self.off_angle_deg > 180 {
            return Err("servo angles must be 0..=180 degrees");
        }
        if self.control_loop_interval_ms == 0 {
            return Err("control_loop_interval_ms must be non-zero");
        }
        Ok(())
    }
}
