//! Integration tests: SwitchService → state machines → servo port.
//!
//! Mock adapters record every servo call so tests can assert on the
//! full command history without touching real LEDC/UART peripherals.

use dmxswitch::app::commands::AppCommand;
use dmxswitch::app::events::AppEvent;
use dmxswitch::app::ports::{DmxPort, EventSink, ServoPort};
use dmxswitch::app::service::SwitchService;
use dmxswitch::config::SystemConfig;
use dmxswitch::dmx::SwitchPosition;
use dmxswitch::switch::SwitchState;
use dmxswitch::DmxError;

// ── Mock implementations ──────────────────────────────────────

struct MockHw {
    raw: [u8; 8],
    start_address: u16,
    calls: Vec<(usize, u8)>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            raw: [0; 8],
            start_address: 501,
            calls: Vec::new(),
        }
    }

    fn set_raw(&mut self, channel: usize, value: u8) {
        self.raw[channel] = value;
    }

    fn last_call(&self) -> Option<(usize, u8)> {
        self.calls.last().copied()
    }
}

impl DmxPort for MockHw {
    fn read_channel(&self, channel: usize) -> u8 {
        self.raw.get(channel).copied().unwrap_or(0)
    }

    fn set_start_address(&mut self, addr: u16) -> Result<(), DmxError> {
        if addr == 0 || addr > 510 {
            return Err(DmxError::AddressOutOfRange);
        }
        self.start_address = addr;
        Ok(())
    }
}

impl ServoPort for MockHw {
    fn write_angle(&mut self, channel: usize, degrees: u8) {
        self.calls.push((channel, degrees));
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

fn started_service() -> (SwitchService, MockHw, RecordingSink) {
    let mut app = SwitchService::new(SystemConfig::default());
    let mut hw = MockHw::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_sweeps_every_servo_to_neutral() {
    let (_, hw, sink) = started_service();
    assert_eq!(hw.calls, vec![(0, 90), (1, 90), (2, 90)]);
    assert_eq!(sink.events, vec![AppEvent::Started { channels: 3 }]);
}

// ── Scenario A–D from the switch timing contract ──────────────

#[test]
fn scenario_a_noise_then_on_throw() {
    let (mut app, mut hw, mut sink) = started_service();
    let swept = hw.calls.len();

    // Two ambiguous-low ticks: nothing proposed, nothing moves.
    app.tick(100, &mut hw, &mut sink);
    app.tick(120, &mut hw, &mut sink);
    assert_eq!(hw.calls.len(), swept);

    // Raw 200 classifies as On -> angle 0, return timer armed.
    hw.set_raw(0, 200);
    app.tick(140, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 0)));
    assert_eq!(
        app.channel_state(0),
        Some(SwitchState::PendingReturn {
            position: SwitchPosition::On,
            deadline_ms: 140 + 2500,
        })
    );
    assert!(sink.events.contains(&AppEvent::Moved {
        channel: 0,
        position: SwitchPosition::On,
        angle_deg: 0,
    }));
}

#[test]
fn scenario_b_late_tick_returns_to_neutral_regardless_of_bus() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(140, &mut hw, &mut sink);

    // 2600 ms later (past the 2500 ms deadline), with the bus now
    // shouting Off, the only command is the neutral return.
    hw.set_raw(0, 50);
    app.tick(140 + 2600, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 90)));
    assert_eq!(
        app.channel_state(0),
        Some(SwitchState::Cooldown {
            position: SwitchPosition::On,
            until_ms: 140 + 2600 + 2500,
        })
    );
    assert!(sink.events.contains(&AppEvent::ReturnedToNeutral { channel: 0 }));
}

#[test]
fn scenario_c_move_rejected_before_deadline() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(140, &mut hw, &mut sink);
    let commands_so_far = hw.calls.len();
    let state = app.channel_state(0);

    // 2000 ms in, the bus proposes the opposite throw: rejected, no
    // command, state untouched.
    hw.set_raw(0, 50);
    app.tick(140 + 2000, &mut hw, &mut sink);
    assert_eq!(hw.calls.len(), commands_so_far);
    assert_eq!(app.channel_state(0), state);
}

#[test]
fn scenario_d_opposite_throw_admitted_after_cooldown() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink); // engage On at angle 0
    app.tick(2500, &mut hw, &mut sink); // neutral return, cooldown to 5000
    hw.set_raw(0, 50);
    app.tick(5000, &mut hw, &mut sink); // cooldown clears, no admission yet
    assert!(sink.events.contains(&AppEvent::DwellCleared { channel: 0 }));

    app.tick(5020, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 180)));
    assert_eq!(
        app.channel_state(0),
        Some(SwitchState::PendingReturn {
            position: SwitchPosition::Off,
            deadline_ms: 5020 + 2500,
        })
    );
}

// ── Independence and idempotence ──────────────────────────────

#[test]
fn channels_are_independent() {
    let (mut app, mut hw, mut sink) = started_service();

    // Channel 0 engages; channel 1 stays quiet.
    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 0)));

    // Mid-dwell for channel 0, channel 1 may still engage.
    hw.set_raw(1, 50);
    app.tick(1000, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((1, 180)));
    assert!(matches!(
        app.channel_state(0),
        Some(SwitchState::PendingReturn { .. })
    ));
    assert!(matches!(
        app.channel_state(1),
        Some(SwitchState::PendingReturn { .. })
    ));
}

#[test]
fn repeating_the_held_position_emits_nothing() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink);
    app.tick(2500, &mut hw, &mut sink);
    app.tick(5000, &mut hw, &mut sink);
    let settled = hw.calls.len();
    let state = app.channel_state(0);

    // Bus keeps asserting On; the channel already sits on On.
    for t in 0..50u64 {
        app.tick(5100 + t * 20, &mut hw, &mut sink);
    }
    assert_eq!(hw.calls.len(), settled);
    assert_eq!(app.channel_state(0), state);
}

#[test]
fn ambiguous_low_mid_dwell_does_not_disturb_the_cycle() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink);

    // The desk drops to zero right after the throw; the latched
    // classification holds and the dwell cycle completes normally.
    hw.set_raw(0, 0);
    app.tick(1000, &mut hw, &mut sink);
    app.tick(2500, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 90)));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn set_start_address_updates_hw_and_config() {
    let (mut app, mut hw, mut sink) = started_service();
    app.handle_command(AppCommand::SetStartAddress(7), &mut hw, &mut sink);
    assert_eq!(hw.start_address, 7);
    assert_eq!(app.current_config().dmx_start_address, 7);
    assert!(sink.events.contains(&AppEvent::StartAddressChanged(7)));
}

#[test]
fn force_neutral_resets_channel_even_mid_dwell() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink);
    app.handle_command(AppCommand::ForceNeutral(0), &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 90)));
    assert_eq!(app.channel_state(0), Some(SwitchState::Neutral));

    // Out-of-range channel: no-op, no command.
    let calls = hw.calls.len();
    app.handle_command(AppCommand::ForceNeutral(42), &mut hw, &mut sink);
    assert_eq!(hw.calls.len(), calls);
}

#[test]
fn config_update_applies_new_angles_to_later_moves() {
    let (mut app, mut hw, mut sink) = started_service();
    let updated = SystemConfig {
        on_angle_deg: 30,
        off_angle_deg: 150,
        ..SystemConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(updated), &mut hw, &mut sink);

    hw.set_raw(0, 200);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(hw.last_call(), Some((0, 30)));
}

// ── Full stack through the real hardware adapter ──────────────

#[test]
fn full_stack_frame_to_servo_angle() {
    use dmxswitch::adapters::hardware::HardwareAdapter;
    use dmxswitch::drivers::dmx_receiver::DmxReceiver;
    use dmxswitch::drivers::servo::ServoDriver;

    let config = SystemConfig::default();
    let dmx = DmxReceiver::new(config.dmx_start_address, config.channel_count).unwrap();
    let mut hw = HardwareAdapter::new(dmx, ServoDriver::new(config.channel_count));
    let mut sink = RecordingSink::new();
    let mut app = SwitchService::new(config);
    app.start(&mut hw, &mut sink);

    // A frame with slot 502 (channel 1 of the 501-based window) at 140.
    let mut frame = [0u8; 512];
    frame[501] = 140;
    hw.ingest_frame(&frame);

    app.tick(10, &mut hw, &mut sink);
    assert_eq!(hw.servo_angle(1), Some(0)); // 140 >= 127 -> On throw
    assert_eq!(hw.servo_angle(0), Some(90)); // untouched since the sweep
}

/// The channel poke used by the host simulation loop reaches the servo
/// through the same window and state machine as a real UART frame.
#[test]
fn simulated_channel_poke_drives_servo() {
    use dmxswitch::adapters::hardware::HardwareAdapter;
    use dmxswitch::drivers::dmx_receiver::DmxReceiver;
    use dmxswitch::drivers::servo::ServoDriver;

    let config = SystemConfig::default();
    let dmx = DmxReceiver::new(config.dmx_start_address, config.channel_count).unwrap();
    let mut hw = HardwareAdapter::new(dmx, ServoDriver::new(config.channel_count));
    let mut sink = RecordingSink::new();
    let mut app = SwitchService::new(config);
    app.start(&mut hw, &mut sink);

    hw.set_channel_value(2, 64); // Off band
    app.tick(10, &mut hw, &mut sink);

    assert_eq!(hw.servo_angle(2), Some(180));
    assert!(sink
        .events
        .contains(&AppEvent::Moved { channel: 2, position: SwitchPosition::Off, angle_deg: 180 }));
}
