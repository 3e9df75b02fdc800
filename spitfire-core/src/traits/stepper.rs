//! Stepper output traits
//!
//! The pump motor is split across the two execution contexts: the timer
//! callback owns the step and direction lines, the control loop owns the
//! enable line so it can drop it even when the timer has stopped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pump rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Delivering coolant toward the nozzle
    #[default]
    Forward,
    /// Pulling coolant back out of the line (drain)
    Reverse,
}

/// Step and direction lines, driven from the timer callback
///
/// Implementations must not block: both methods are called from
/// interrupt context.
pub trait StepOutputs {
    /// Drive the direction line
    fn set_direction(&mut self, dir: Direction);

    /// Emit exactly one step pulse
    fn pulse(&mut self);
}

/// Driver enable line, driven from the control loop
pub trait EnableOutput {
    /// Assert (`true`) or release (`false`) the driver enable
    fn set_enabled(&mut self, enabled: bool);

    /// Check the last commanded enable level
    fn is_enabled(&self) -> bool;
}
