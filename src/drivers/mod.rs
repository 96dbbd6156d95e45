//! Servo and DMX drivers plus one-shot hardware initialisation.

pub mod dmx_receiver;
pub mod hw_init;
pub mod servo;
