//! Unified error types for the DmxSwitch firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling
//! uniform. All variants are `Copy` so they can be cheaply passed around
//! without allocation. The switch state machine itself is infallible — these
//! types cover the configuration and driver boundary only.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The DMX receive side rejected an operation.
    Dmx(DmxError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dmx(e) => write!(f, "dmx: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// DMX errors
// ---------------------------------------------------------------------------

/// Errors from the DMX receive path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmxError {
    /// Requested start address would place the channel window outside
    /// the 512-slot universe.
    AddressOutOfRange,
}

impl fmt::Display for DmxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressOutOfRange => write!(f, "start address out of range"),
        }
    }
}

impl From<DmxError> for Error {
    fn from(e: DmxError) -> Self {
        Self::Dmx(e)
    }
}
