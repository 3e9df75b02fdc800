//! Embassy async tasks
//!
//! The stepper task runs on the interrupt executor and stands in for the
//! step timer interrupt. The control task runs on the thread executor.

pub mod control;
pub mod stepper;

pub use control::{control_task, ControlHardware, PumpController};
pub use stepper::{stepper_task, PumpStepPins};
