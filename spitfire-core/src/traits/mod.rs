//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod stepper;
pub mod valves;

pub use display::{DisplayAdapter, DisplayError, NoDisplay};
pub use stepper::{Direction, EnableOutput, StepOutputs};
pub use valves::ValveOutputs;
