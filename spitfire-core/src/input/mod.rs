//! Operator input handling
//!
//! Potentiometer smoothing, switch debouncing and the per-cycle sampler
//! that combines them.

pub mod debounce;
pub mod sampler;
pub mod smoothing;
pub mod switch;

pub use debounce::{Debouncer, Edge};
pub use sampler::{InputSampler, RawInputs, Requests, SampledInputs};
pub use smoothing::{Potentiometer, PotentiometerReading};
pub use switch::{AnySwitch, MaintainedSwitch, MomentarySwitch, SwitchReader, SwitchState};
