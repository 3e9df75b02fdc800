//! Stepper driver implementations

pub mod step_dir;

pub use step_dir::{EnablePin, StepDirPins, DEFAULT_PULSE_WIDTH_NS};
