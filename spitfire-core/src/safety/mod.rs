//! Safety monitoring
//!
//! Detects fault conditions that must stop the motor.

pub mod monitor;

pub use monitor::{Fault, SafetyStatus, TickMonitor};
