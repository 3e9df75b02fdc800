//! Operating mode state machine

pub mod controller;
pub mod events;
pub mod machine;
pub mod timers;

pub use controller::{ModeController, ModeInputs, Transition, Transitions};
pub use events::ModeEvent;
pub use machine::Mode;
pub use timers::{spit_duration_ms, DrainTimer, SpitTimer};
