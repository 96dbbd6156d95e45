//! DMX channel value classification.
//!
//! A DMX slot carries one byte per channel. Lighting desks quantise
//! fader output, so a channel parked at "off" jitters between 0 and a
//! few counts. The classifier maps the byte into three bands:
//!
//! | Raw value       | Meaning                                    |
//! |-----------------|--------------------------------------------|
//! | `0..=2`         | ambiguous-low — hold the latched position  |
//! | `3..=126`       | Off throw                                  |
//! | `127..=255`     | On throw                                   |
//!
//! The ambiguous-low band deliberately returns the last *engaged*
//! classification instead of Neutral: a transient zero reading must not
//! force an unwanted return-to-neutral cycle. Neutral is only ever
//! reached through the switch state machine's dwell timer, never
//! requested by the bus.

/// Logical position of one switch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchPosition {
    /// Rest state between throws.
    #[default]
    Neutral,
    /// Engaged On throw (servo at the On angle).
    On,
    /// Engaged Off throw (servo at the Off angle).
    Off,
}

impl SwitchPosition {
    /// True for On/Off, false for Neutral.
    pub fn is_engaged(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// Highest raw value treated as ambiguous-low noise.
pub const AMBIGUOUS_LOW_MAX: u8 = 2;
/// Lowest raw value classified as the On throw.
pub const ON_THRESHOLD: u8 = 127;

/// Per-channel classifier with last-engaged latching.
///
/// The latch starts at Neutral and, once any engaged value has been
/// observed, never returns to Neutral for the life of the channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelReader {
    latched: SwitchPosition,
}

impl ChannelReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one raw channel byte into a proposed position.
    ///
    /// Readings in the ambiguous-low band return the latched position
    /// unchanged; engaged readings update the latch.
    pub fn classify(&mut self, raw: u8) -> SwitchPosition {
        if raw <= AMBIGUOUS_LOW_MAX {
            return self.latched;
        }
        let position = if raw >= ON_THRESHOLD {
            SwitchPosition::On
        } else {
            SwitchPosition::Off
        };
        self.latched = position;
        position
    }

    /// Last engaged classification (Neutral only before the first one).
    pub fn latched(&self) -> SwitchPosition {
        self.latched
    }
}
