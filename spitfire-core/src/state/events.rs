//! Events that trigger mode transitions

use crate::safety::Fault;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    // Switch events
    /// Fast switch closed
    FastPressed,
    /// Fast switch opened
    FastReleased,
    /// Mist request turned on
    MistOn,
    /// Mist request turned off
    MistOff,
    /// Spit trigger accepted
    SpitTriggered,

    // Timer events
    /// Spit duration elapsed
    SpitExpired,
    /// Drain duration elapsed
    DrainFinished,

    // Flow events
    /// Mist demand fell below the minimum flow
    DemandZero,

    // Safety events
    /// Fault detected by the safety monitor
    FaultDetected(Fault),
}
