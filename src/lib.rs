//! DmxSwitch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod dmx;
pub mod switch;

mod error;
mod pins;

pub use error::{DmxError, Error};

// Hardware-facing modules; the actual peripheral code inside is guarded
// by cfg attributes so the crate compiles and tests on host targets.
pub mod adapters;
pub mod drivers;
