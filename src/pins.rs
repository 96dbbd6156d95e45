//! GPIO / peripheral pin assignments for the DmxSwitch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

use crate::config::MAX_CHANNELS;

// ---------------------------------------------------------------------------
// Servo outputs (LEDC PWM)
// ---------------------------------------------------------------------------

/// PWM output pins, one per servo channel, starting at GPIO 3.
pub const SERVO_PWM_GPIOS: [i32; MAX_CHANNELS] = [3, 4, 5, 6, 7, 8, 9, 14];

/// LEDC base frequency for servo PWM (standard 50 Hz servo frame).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits). 14-bit gives ~1.2 µs pulse granularity
/// at 50 Hz, comfortably finer than a hobby servo's deadband.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// PWM frame period at 50 Hz.
pub const SERVO_PWM_PERIOD_US: u32 = 20_000;

/// Pulse width commanding 0 degrees (Arduino Servo library default).
pub const SERVO_MIN_PULSE_US: u32 = 544;
/// Pulse width commanding 180 degrees (Arduino Servo library default).
pub const SERVO_MAX_PULSE_US: u32 = 2_400;

// ---------------------------------------------------------------------------
// DMX receive (RS-485 transceiver, e.g. MAX485 with DE/RE tied low)
// ---------------------------------------------------------------------------

/// UART peripheral number used for DMX input.
pub const DMX_UART_NUM: u32 = 1;
/// UART RX pin wired to the transceiver's RO output.
pub const DMX_UART_RX_GPIO: i32 = 18;
/// DMX line rate (fixed by the DMX-512 standard).
pub const DMX_BAUD_RATE: u32 = 250_000;

// ---------------------------------------------------------------------------
// UART debug console
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
