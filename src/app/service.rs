//! Application service — the hexagonal core.
//!
//! [`SwitchService`] owns one classifier + state machine pair per DMX
//! channel and drives them once per control tick, in index order. It
//! exposes a clean, hardware-agnostic API. All I/O flows through port
//! traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!     DmxPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │        SwitchService        │
//!   ServoPort ◀── │  ChannelReader · SwitchFsm  │
//!                 └────────────────────────────┘
//! ```
//!
//! Channels are fully independent: no channel's decision reads another
//! channel's state, and the slot collection is allocated once at
//! construction — the tick path never allocates.

use heapless::Vec;
use log::{info, warn};

use crate::config::{SystemConfig, MAX_CHANNELS};
use crate::dmx::{ChannelReader, SwitchPosition};
use crate::switch::{ServoCommand, SwitchFsm, SwitchState};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{DmxPort, EventSink, ServoPort};

// ───────────────────────────────────────────────────────────────
// Per-channel slot
// ───────────────────────────────────────────────────────────────

struct ChannelSlot {
    reader: ChannelReader,
    fsm: SwitchFsm,
}

// ───────────────────────────────────────────────────────────────
// SwitchService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SwitchService {
    channels: Vec<ChannelSlot, MAX_CHANNELS>,
    config: SystemConfig,
    tick_count: u64,
}

impl SwitchService {
    /// Construct the service from configuration.
    ///
    /// One slot per configured channel, capacity-bounded by
    /// [`MAX_CHANNELS`]. Does **not** touch hardware — call [`start`]
    /// next to sweep the servos to neutral.
    ///
    /// [`start`]: Self::start
    pub fn new(config: SystemConfig) -> Self {
        let count = config.channel_count.min(MAX_CHANNELS);
        if count < config.channel_count {
            warn!(
                "channel_count {} exceeds capacity, clamped to {}",
                config.channel_count, MAX_CHANNELS
            );
        }

        let mut channels = Vec::new();
        for _ in 0..count {
            // Capacity checked above; push cannot fail.
            let _ = channels.push(ChannelSlot {
                reader: ChannelReader::new(),
                fsm: SwitchFsm::new(u64::from(config.move_delay_ms)),
            });
        }

        Self {
            channels,
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Sweep every servo to the neutral angle before the first tick.
    pub fn start(&mut self, hw: &mut impl ServoPort, sink: &mut impl EventSink) {
        for idx in 0..self.channels.len() {
            hw.write_angle(idx, self.config.neutral_angle_deg);
        }
        sink.emit(&AppEvent::Started {
            channels: self.channels.len(),
        });
        info!("SwitchService started ({} channels)", self.channels.len());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: poll the bus, advance every channel
    /// state machine, apply at most one servo command per channel.
    ///
    /// The `hw` parameter satisfies **both** [`DmxPort`] and
    /// [`ServoPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit. `now_ms` must be
    /// non-decreasing across calls.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl DmxPort + ServoPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let neutral_angle = self.config.neutral_angle_deg;
        let on_angle = self.config.on_angle_deg;
        let off_angle = self.config.off_angle_deg;

        for idx in 0..self.channels.len() {
            let raw = hw.read_channel(idx);
            let slot = &mut self.channels[idx];
            let was_cooling = matches!(slot.fsm.state(), SwitchState::Cooldown { .. });

            let proposed = slot.reader.classify(raw);
            match slot.fsm.advance(proposed, now_ms) {
                Some(ServoCommand::Engage(position)) => {
                    let angle_deg = match position {
                        SwitchPosition::On => on_angle,
                        SwitchPosition::Off => off_angle,
                        // SwitchFsm never engages toward neutral.
                        SwitchPosition::Neutral => neutral_angle,
                    };
                    hw.write_angle(idx, angle_deg);
                    sink.emit(&AppEvent::Moved {
                        channel: idx,
                        position,
                        angle_deg,
                    });
                }
                Some(ServoCommand::ReturnToNeutral) => {
                    hw.write_angle(idx, neutral_angle);
                    sink.emit(&AppEvent::ReturnedToNeutral { channel: idx });
                }
                None => {
                    if was_cooling && !self.channels[idx].fsm.is_dwelling() {
                        sink.emit(&AppEvent::DwellCleared { channel: idx });
                    }
                }
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from serial console or debug tooling).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut (impl DmxPort + ServoPort),
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::SetStartAddress(addr) => match hw.set_start_address(addr) {
                Ok(()) => {
                    self.config.dmx_start_address = addr;
                    sink.emit(&AppEvent::StartAddressChanged(addr));
                    info!("DMX start address moved to {}", addr);
                }
                Err(e) => warn!("start address {} rejected: {}", addr, e),
            },

            AppCommand::UpdateConfig(new_config) => {
                if let Err(reason) = new_config.validate() {
                    warn!("config update rejected: {}", reason);
                    return;
                }
                if new_config.channel_count != self.channels.len() {
                    warn!("channel_count change requires a restart; keeping {} slots",
                        self.channels.len());
                }
                for slot in &mut self.channels {
                    slot.fsm.set_move_delay(u64::from(new_config.move_delay_ms));
                }
                self.config = new_config;
                sink.emit(&AppEvent::ConfigUpdated);
                info!("Configuration updated at runtime");
            }

            AppCommand::ForceNeutral(channel) => {
                // Out-of-range channel index: silently ignored.
                let Some(slot) = self.channels.get_mut(channel) else {
                    return;
                };
                slot.fsm.reset();
                hw.write_angle(channel, self.config.neutral_angle_deg);
                sink.emit(&AppEvent::ReturnedToNeutral { channel });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// State machine snapshot for one channel; `None` when out of range.
    pub fn channel_state(&self, channel: usize) -> Option<SwitchState> {
        self.channels.get(channel).map(|s| s.fsm.state())
    }

    /// Number of channel slots under control.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration (for console read-back).
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DmxError;

    struct NullHw;
    impl DmxPort for NullHw {
        fn read_channel(&self, _channel: usize) -> u8 {
            0
        }
        fn set_start_address(&mut self, _addr: u16) -> Result<(), DmxError> {
            Err(DmxError::AddressOutOfRange)
        }
    }
    impl ServoPort for NullHw {
        fn write_angle(&mut self, _channel: usize, _degrees: u8) {}
    }
    struct NullSink;
    impl EventSink for NullSink {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    #[test]
    fn builds_one_slot_per_configured_channel() {
        let app = SwitchService::new(SystemConfig::default());
        assert_eq!(app.channel_count(), 3);
        assert_eq!(app.channel_state(0), Some(SwitchState::Neutral));
        assert_eq!(app.channel_state(3), None);
    }

    #[test]
    fn clamps_channel_count_to_capacity() {
        let config = SystemConfig {
            channel_count: MAX_CHANNELS + 4,
            dmx_start_address: 1,
            ..SystemConfig::default()
        };
        let app = SwitchService::new(config);
        assert_eq!(app.channel_count(), MAX_CHANNELS);
    }

    #[test]
    fn rejected_start_address_leaves_config_unchanged() {
        let mut app = SwitchService::new(SystemConfig::default());
        app.handle_command(AppCommand::SetStartAddress(512), &mut NullHw, &mut NullSink);
        assert_eq!(app.current_config().dmx_start_address, 501);
    }

    #[test]
    fn invalid_config_update_is_dropped() {
        let mut app = SwitchService::new(SystemConfig::default());
        let bad = SystemConfig {
            move_delay_ms: 0,
            ..SystemConfig::default()
        };
        app.handle_command(AppCommand::UpdateConfig(bad), &mut NullHw, &mut NullSink);
        assert_eq!(app.current_config().move_delay_ms, 2500);
    }

    struct ScriptedHw {
        raw: [u8; MAX_CHANNELS],
        written: std::vec::Vec<(usize, u8)>,
    }
    impl DmxPort for ScriptedHw {
        fn read_channel(&self, channel: usize) -> u8 {
            self.raw[channel]
        }
        fn set_start_address(&mut self, _addr: u16) -> Result<(), DmxError> {
            Ok(())
        }
    }
    impl ServoPort for ScriptedHw {
        fn write_angle(&mut self, channel: usize, degrees: u8) {
            self.written.push((channel, degrees));
        }
    }

    #[test]
    fn engage_maps_on_and_off_to_their_configured_angles() {
        let mut app = SwitchService::new(SystemConfig::default());
        let mut hw = ScriptedHw {
            raw: [0; MAX_CHANNELS],
            written: std::vec::Vec::new(),
        };

        hw.raw[0] = 200; // On band
        hw.raw[1] = 50; // Off band
        app.tick(0, &mut hw, &mut NullSink);

        assert_eq!(hw.written, vec![(0, 0), (1, 180)]);
    }

    #[test]
    fn force_neutral_out_of_range_is_a_noop() {
        let mut app = SwitchService::new(SystemConfig::default());
        app.handle_command(AppCommand::ForceNeutral(99), &mut NullHw, &mut NullSink);
        assert_eq!(app.tick_count(), 0);
    }
}
