//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in spitfire-core on top of `embedded-hal` 1.0 digital pins:
//!
//! - Stepper STEP/DIR outputs and driver enable
//! - Mist valve, air valve and spit LED outputs
//! - Operator switch inputs
//!
//! Every pin takes an [`ActiveLevel`] so boards with inverting drivers or
//! pull-up contacts need no code changes.

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod pin;
pub mod stepper;
pub mod valves;

#[cfg(test)]
mod mock;

pub use pin::ActiveLevel;
