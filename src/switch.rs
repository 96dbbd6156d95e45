//! Per-channel switch state machine with dwell-time debouncing.
//!
//! One `SwitchFsm` per DMX channel. Each control tick it receives the
//! classified bus proposal plus the current monotonic time and decides
//! whether the servo may move:
//!
//! ```text
//!            engaged proposal admitted
//!   Neutral ───────────────────────────▶ PendingReturn
//!   Engaged ───────────────────────────▶   (deadline = now + move_delay)
//!      ▲                                       │ deadline reached:
//!      │ cooldown elapsed                      │ command neutral
//!      │ (position retained)                   ▼
//!   Engaged ◀─────────────────────────── Cooldown
//!                                          (until = now + move_delay)
//! ```
//!
//! A move is admitted only when the proposal is engaged, differs from
//! the current position, and no dwell timer is running — so at least
//! `2 * move_delay` elapses between a throw and the next admissible one.
//! Timer expiry and admission are mutually exclusive within one tick.
//! Neutral is reached exclusively through the dwell timer; the bus can
//! never request it.
//!
//! Timestamps must be non-decreasing per channel (monotonic host clock).

use crate::dmx::SwitchPosition;

/// Tagged per-channel state. Each variant carries exactly the fields
/// valid for it, so "at most one timer armed" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Initial rest state; no throw has ever been commanded.
    Neutral,
    /// A throw completed its full dwell cycle; the servo sits at
    /// neutral but the channel remembers its last commanded position.
    Engaged { position: SwitchPosition },
    /// A throw was commanded; the servo must return to neutral once the
    /// deadline passes.
    PendingReturn {
        position: SwitchPosition,
        deadline_ms: u64,
    },
    /// The neutral return was commanded; the servo is in transit and no
    /// new move is admitted until the timer clears.
    Cooldown {
        position: SwitchPosition,
        until_ms: u64,
    },
}

/// Physical command emitted by [`SwitchFsm::advance`] — at most one per
/// tick. The caller maps positions to angles and drives the servo port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoCommand {
    /// Throw the servo to the given engaged position.
    Engage(SwitchPosition),
    /// Return the servo to the neutral angle.
    ReturnToNeutral,
}

pub struct SwitchFsm {
    state: SwitchState,
    move_delay_ms: u64,
}

impl SwitchFsm {
    pub fn new(move_delay_ms: u64) -> Self {
        Self {
            state: SwitchState::Neutral,
            move_delay_ms,
        }
    }

    /// Advance by one control tick.
    ///
    /// `proposed` is the classified bus value for this channel and
    /// `now_ms` the current monotonic time. Returns the physical
    /// command to issue this tick, if any.
    pub fn advance(&mut self, proposed: SwitchPosition, now_ms: u64) -> Option<ServoCommand> {
        match self.state {
            // Timer-expiry transitions run first and preclude admission
            // in the same tick.
            SwitchState::Cooldown { position, until_ms } => {
                if now_ms >= until_ms {
                    self.state = SwitchState::Engaged { position };
                }
                None
            }

            SwitchState::PendingReturn {
                position,
                deadline_ms,
            } => {
                if now_ms >= deadline_ms {
                    self.state = SwitchState::Cooldown {
                        position,
                        until_ms: now_ms + self.move_delay_ms,
                    };
                    return Some(ServoCommand::ReturnToNeutral);
                }
                None
            }

            SwitchState::Neutral | SwitchState::Engaged { .. } => self.admit(proposed, now_ms),
        }
    }

    fn admit(&mut self, proposed: SwitchPosition, now_ms: u64) -> Option<ServoCommand> {
        if !proposed.is_engaged() || proposed == self.position() {
            return None;
        }
        self.state = SwitchState::PendingReturn {
            position: proposed,
            deadline_ms: now_ms + self.move_delay_ms,
        };
        Some(ServoCommand::Engage(proposed))
    }

    /// Discard any armed timer and forget the commanded position.
    /// Used by the force-neutral debug command, never by the bus path.
    pub fn reset(&mut self) {
        self.state = SwitchState::Neutral;
    }

    /// Update the dwell time for subsequent transitions. Timers already
    /// armed keep their original expiry.
    pub fn set_move_delay(&mut self, move_delay_ms: u64) {
        self.move_delay_ms = move_delay_ms;
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Last commanded engaged position. Neutral only before the first
    /// admitted move; a neutral return never resets it.
    pub fn position(&self) -> SwitchPosition {
        match self.state {
            SwitchState::Neutral => SwitchPosition::Neutral,
            SwitchState::Engaged { position }
            | SwitchState::PendingReturn { position, .. }
            | SwitchState::Cooldown { position, .. } => position,
        }
    }

    /// True while a dwell timer is armed (move admission blocked).
    pub fn is_dwelling(&self) -> bool {
        matches!(
            self.state,
            SwitchState::PendingReturn { .. } | SwitchState::Cooldown { .. }
        )
    }
}
