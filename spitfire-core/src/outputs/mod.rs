//! Valve and indicator outputs

pub mod valves;

pub use valves::ValveState;
