//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { channels } => {
                info!("START | {} channels swept to neutral", channels);
            }
            AppEvent::Moved {
                channel,
                position,
                angle_deg,
            } => {
                info!(
                    "MOVE  | ch={} -> {:?} ({} deg), return armed",
                    channel, position, angle_deg
                );
            }
            AppEvent::ReturnedToNeutral { channel } => {
                info!("MOVE  | ch={} returning to neutral", channel);
            }
            AppEvent::DwellCleared { channel } => {
                info!("DWELL | ch={} cleared, moves admitted again", channel);
            }
            AppEvent::StartAddressChanged(addr) => {
                info!("DMX   | start address now {}", addr);
            }
            AppEvent::ConfigUpdated => {
                info!("CONF  | runtime configuration applied");
            }
        }
    }
}
