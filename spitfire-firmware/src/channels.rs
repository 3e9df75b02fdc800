//! State shared between tasks
//!
//! The control task publishes the flow command and the stepper task
//! consumes it. Both sides touch only atomics, so no mutex is needed
//! between the thread-mode executor and the interrupt executor.

use spitfire_core::scheduler::SharedFlowCommand;

/// Flow command and step-timer heartbeat
pub static FLOW_COMMAND: SharedFlowCommand = SharedFlowCommand::new();
