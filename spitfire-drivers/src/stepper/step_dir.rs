//! STEP/DIR/EN stepper driver
//!
//! Works with any driver that takes a step pulse and a direction level
//! (A4988, DRV8825, TMC2209 in standalone mode). STEP and DIR are driven
//! from the step timer; EN is driven from the control loop.
//!
//! # Timing
//!
//! The step pulse is held high for `pulse_width_ns` using a blocking delay.
//! A4988 needs 1 us, DRV8825 1.9 us, TMC2209 100 ns.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use spitfire_core::traits::{Direction, EnableOutput, StepOutputs};

use crate::pin::ActiveLevel;

/// Default step pulse width, enough for A4988 and DRV8825
pub const DEFAULT_PULSE_WIDTH_NS: u32 = 2_000;

/// STEP and DIR outputs
pub struct StepDirPins<S, D, T> {
    step: S,
    dir: D,
    delay: T,
    pulse_width_ns: u32,
    /// If true, Forward = DIR low
    invert_direction: bool,
}

impl<S, D, T> StepDirPins<S, D, T>
where
    S: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    T: DelayNs,
{
    /// Create the outputs with STEP low
    ///
    /// # Arguments
    /// - `pulse_width_ns`: time STEP is held high per step
    /// - `invert_direction`: swap the DIR level for pumps wired in reverse
    pub fn new(
        mut step: S,
        dir: D,
        delay: T,
        pulse_width_ns: u32,
        invert_direction: bool,
    ) -> Self {
        step.set_low().unwrap_or_else(|e| match e {});
        Self {
            step,
            dir,
            delay,
            pulse_width_ns,
            invert_direction,
        }
    }
}

impl<S, D, T> StepOutputs for StepDirPins<S, D, T>
where
    S: OutputPin<Error = Infallible>,
    D: OutputPin<Error = Infallible>,
    T: DelayNs,
{
    fn set_direction(&mut self, dir: Direction) {
        let forward_high = !self.invert_direction;
        let high = (dir == Direction::Forward) == forward_high;
        self.dir
            .set_state(PinState::from(high))
            .unwrap_or_else(|e| match e {});
    }

    fn pulse(&mut self) {
        self.step.set_high().unwrap_or_else(|e| match e {});
        self.delay.delay_ns(self.pulse_width_ns);
        self.step.set_low().unwrap_or_else(|e| match e {});
    }
}

/// Driver enable output
pub struct EnablePin<P> {
    pin: P,
    level: ActiveLevel,
    enabled: bool,
}

impl<P: OutputPin<Error = Infallible>> EnablePin<P> {
    /// Create the enable output, deasserted
    pub fn new(pin: P, level: ActiveLevel) -> Self {
        let mut enable = Self {
            pin,
            level,
            enabled: true,
        };
        // Ensure the driver starts disabled
        enable.set_enabled(false);
        enable
    }
}

impl<P: OutputPin<Error = Infallible>> EnableOutput for EnablePin<P> {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.pin
            .set_state(self.level.pin_state(enabled))
            .unwrap_or_else(|e| match e {});
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockOutput;

    /// Delay that records requested time
    struct MockDelay {
        total_ns: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns;
        }
    }

    fn pins(invert: bool) -> StepDirPins<MockOutput, MockOutput, MockDelay> {
        StepDirPins::new(
            MockOutput::new(),
            MockOutput::new(),
            MockDelay { total_ns: 0 },
            DEFAULT_PULSE_WIDTH_NS,
            invert,
        )
    }

    #[test]
    fn test_pulse_is_one_step() {
        let mut p = pins(false);

        p.pulse();
        p.pulse();
        assert_eq!(p.step.rising, 2);
        assert!(!p.step.high);
        assert_eq!(p.delay.total_ns, 2 * DEFAULT_PULSE_WIDTH_NS);
    }

    #[test]
    fn test_direction_levels() {
        let mut p = pins(false);
        p.set_direction(Direction::Forward);
        assert!(p.dir.high);
        p.set_direction(Direction::Reverse);
        assert!(!p.dir.high);

        let mut inverted = pins(true);
        inverted.set_direction(Direction::Forward);
        assert!(!inverted.dir.high);
    }

    #[test]
    fn test_enable_active_low() {
        let mut en = EnablePin::new(MockOutput::new(), ActiveLevel::Low);

        // Disabled at creation means pin high
        assert!(!en.is_enabled());
        assert!(en.pin.high);

        en.set_enabled(true);
        assert!(en.is_enabled());
        assert!(!en.pin.high);
    }

    #[test]
    fn test_enable_trait() {
        fn check<E: EnableOutput>(e: &mut E) {
            assert!(!e.is_enabled());
            e.set_enabled(true);
            assert!(e.is_enabled());
        }

        let mut en = EnablePin::new(MockOutput::new(), ActiveLevel::High);
        check(&mut en);
        assert!(en.pin.high);
    }
}
