//! Mock embedded-hal pins for driver tests

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Output pin that records its level and write count
pub struct MockOutput {
    pub high: bool,
    pub writes: u32,
    /// Number of low-to-high transitions
    pub rising: u32,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            high: false,
            writes: 0,
            rising: 0,
        }
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rising += 1;
        }
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Input pin with a settable level
pub struct MockInput {
    pub high: bool,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self { high }
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}
