//! DmxSwitch Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate polling control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter        LogEventSink      MonotonicClock │
//! │  (DmxPort + ServoPort)  (EventSink)       (now_ms)       │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            SwitchService (pure logic)              │  │
//! │  │    ChannelReader · SwitchFsm (one per channel)     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use dmxswitch::adapters::hardware::HardwareAdapter;
use dmxswitch::adapters::log_sink::LogEventSink;
use dmxswitch::adapters::time::MonotonicClock;
use dmxswitch::app::service::SwitchService;
use dmxswitch::config::SystemConfig;
use dmxswitch::drivers::dmx_receiver::{DmxReceiver, DMX_START_CODE};
use dmxswitch::drivers::hw_init;
use dmxswitch::drivers::servo::ServoDriver;

// ── Host simulation ───────────────────────────────────────────
//
// Without a console on the bus, bench runs drive the receiver with a
// scripted fader pattern: each channel is pushed On, released to the
// quiet band, then pushed Off, staggered per channel so the log shows
// the state machines operating independently.

#[cfg(not(target_os = "espidf"))]
fn simulate_console(tick: u64, channel_count: usize, hw: &mut HardwareAdapter) {
    const PERIOD: u64 = 600;
    const STAGGER: u64 = 150;

    for channel in 0..channel_count {
        let phase = (tick + STAGGER * channel as u64) % PERIOD;
        let value = match phase {
            0..=249 => 255, // On band
            250..=299 => 0, // quiet bus, reader holds the latch
            300..=549 => 64, // Off band
            _ => 0,
        };
        hw.set_channel_value(channel, value);
    }
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("DmxSwitch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(dmxswitch::Error::Config)?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(config.channel_count) {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Adapters ───────────────────────────────────────────
    let dmx = DmxReceiver::new(config.dmx_start_address, config.channel_count)
        .map_err(dmxswitch::Error::from)?;
    let mut hw = HardwareAdapter::new(dmx, ServoDriver::new(config.channel_count));
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 5. Application service ────────────────────────────────
    let mut app = SwitchService::new(config.clone());
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    // 513 bytes: start code + one full universe.
    let mut frame_buf = [0u8; 513];
    #[cfg(not(target_os = "espidf"))]
    let mut sim_tick: u64 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));

        // Drain the DMX UART. A well-formed dimmer frame begins with the
        // 0x00 start code; anything else (RDM, partial frame) is skipped.
        // Framing relies on read alignment; a break-interrupt delimiter on
        // the UART event queue is the planned replacement.
        let n = hw_init::dmx_uart_read(&mut frame_buf);
        if n > 1 && frame_buf[0] == DMX_START_CODE {
            hw.ingest_frame(&frame_buf[1..n]);
        }

        // On host targets the UART stub reads nothing; the scripted
        // console supplies the channel values instead.
        #[cfg(not(target_os = "espidf"))]
        {
            simulate_console(sim_tick, config.channel_count, &mut hw);
            sim_tick += 1;
        }

        app.tick(clock.now_ms(), &mut hw, &mut sink);
    }
}
