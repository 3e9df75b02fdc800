//! Step scheduler
//!
//! Split across the two execution contexts: [`StepScheduler`] publishes
//! commands from the main loop, [`PulseGenerator`] consumes them in the
//! step timer. [`VirtualTimer`] drives the generator on the host.

pub mod command;
pub mod deadline;
pub mod pulse;
pub mod step;
pub mod timer;

pub use command::{FlowCommand, SharedFlowCommand, MAX_INTERVAL_US};
pub use deadline::StepDeadline;
pub use pulse::{PulseAction, PulseGenerator};
pub use step::StepScheduler;
pub use timer::VirtualTimer;
