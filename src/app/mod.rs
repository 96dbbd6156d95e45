//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the DmxSwitch system:
//! per-channel classification, the switch state machines, and the
//! supervisor that drives them once per control tick. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
