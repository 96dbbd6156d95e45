//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                      |
//! |------------|------------|----------------------------------|
//! | `hardware` | DmxPort    | DMX universe buffer (UART RX)    |
//! |            | ServoPort  | LEDC servo PWM                   |
//! | `log_sink` | EventSink  | Serial log output                |
//! | `time`     | —          | ESP32 system timer / host clock  |

pub mod hardware;
pub mod log_sink;
pub mod time;
