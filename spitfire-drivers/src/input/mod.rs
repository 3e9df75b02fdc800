//! Operator input drivers

pub mod switches;

pub use switches::{SwitchBank, SwitchPin};
