//! Valve and indicator drivers

pub mod gpio;

pub use gpio::GpioValves;
