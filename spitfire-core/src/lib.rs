//! Board-agnostic core logic for the Spitfire MQL pump
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (step/direction/enable, valves, display)
//! - Input sampling (potentiometer smoothing, switch debouncing)
//! - Flow mapping from operator demand to step interval
//! - Mode state machine with spit and drain timing
//! - Step scheduler shared between the control loop and the step timer
//! - Safety monitoring of the step timer
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod display;
pub mod flow;
pub mod input;
pub mod outputs;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use controller::{ControlOutputs, Controller, CycleReport};
