//! Configuration types
//!
//! Runtime pump configuration, validated once at startup.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::ConfigError;
