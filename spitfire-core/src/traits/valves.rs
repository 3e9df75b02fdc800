//! Valve and indicator output trait

use crate::outputs::ValveState;

/// Air valve, mist valve and spit indicator outputs
pub trait ValveOutputs {
    /// Apply a complete output state
    ///
    /// Called every control cycle; implementations may skip writes that
    /// do not change a pin.
    fn apply(&mut self, state: ValveState);
}
