//! Operating mode definition
//!
//! Motor, valve and indicator behavior is a function of the current mode
//! and the air flag.

use super::events::ModeEvent;
use crate::traits::Direction;

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Motor stopped, valves closed
    #[default]
    Off,
    /// Continuous metered mist
    Mist,
    /// Full-speed purge while the fast switch is held
    Fast,
    /// Timed high-flow burst
    Spit,
    /// Motor stopped, air valve open
    Air,
    /// Reverse run to clear the delivery line
    Drain,
}

impl Mode {
    /// Check if this mode drives the motor
    pub fn motor_running(&self) -> bool {
        matches!(self, Mode::Mist | Mode::Fast | Mode::Spit | Mode::Drain)
    }

    /// Motor direction used in this mode
    pub fn direction(&self) -> Direction {
        match self {
            Mode::Drain => Direction::Reverse,
            _ => Direction::Forward,
        }
    }

    /// Check if the mist valve is open in this mode
    pub fn mist_valve(&self) -> bool {
        matches!(self, Mode::Mist | Mode::Fast | Mode::Spit)
    }

    /// Check if this mode needs air assist regardless of the air flag
    pub fn needs_air(&self) -> bool {
        matches!(self, Mode::Fast | Mode::Spit)
    }

    /// Mode to resume after a fast purge entered from this mode
    ///
    /// Timed modes are not resumed: a spit falls back to mist and a drain
    /// is abandoned.
    pub fn resume_target(&self) -> Self {
        match self {
            Mode::Spit => Mode::Mist,
            Mode::Drain | Mode::Air => Mode::Off,
            other => *other,
        }
    }

    /// Process an event and return the next mode
    ///
    /// Releasing Fast is not resolved here: the mode to return to is held
    /// by the controller.
    pub fn transition(self, event: ModeEvent) -> Self {
        use Mode::*;
        use ModeEvent::*;

        match (self, event) {
            // Faults stop everything
            (_, FaultDetected(_)) => Off,

            // Fast overrides everything while held
            (_, FastPressed) => Fast,
            (Fast, _) => Fast,

            // Mist switch
            (Off | Air, MistOn) => Mist,
            (Mist | Spit | Drain, MistOff) => Off,

            // Spit
            (Mist, SpitTriggered) => Spit,
            (Spit, SpitExpired) => Mist,

            // Drain
            (Mist, DemandZero) => Drain,
            (Drain, DrainFinished) => Off,

            // Default: stay in current mode
            _ => self,
        }
    }
}
