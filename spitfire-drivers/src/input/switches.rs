//! Switch inputs
//!
//! Reads the fast, mist and air contacts and reports them as logical
//! levels. Debouncing happens in the core, not here.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use spitfire_core::input::RawInputs;

use crate::pin::ActiveLevel;

/// One switch contact
pub struct SwitchPin<P> {
    pin: P,
    level: ActiveLevel,
}

impl<P: InputPin<Error = Infallible>> SwitchPin<P> {
    /// Create a switch input
    ///
    /// A contact to ground with a pull-up is `ActiveLevel::Low`.
    pub fn new(pin: P, level: ActiveLevel) -> Self {
        Self { pin, level }
    }

    /// Check if the contact is closed
    pub fn is_closed(&mut self) -> bool {
        let high = self.pin.is_high().unwrap_or_else(|e| match e {});
        self.level.is_active(high)
    }
}

/// The three operator switches
pub struct SwitchBank<F, M, A> {
    pub fast: SwitchPin<F>,
    pub mist: SwitchPin<M>,
    pub air: SwitchPin<A>,
}

impl<F, M, A> SwitchBank<F, M, A>
where
    F: InputPin<Error = Infallible>,
    M: InputPin<Error = Infallible>,
    A: InputPin<Error = Infallible>,
{
    /// Create a bank with one polarity for all switches
    pub fn new(fast: F, mist: M, air: A, level: ActiveLevel) -> Self {
        Self {
            fast: SwitchPin::new(fast, level),
            mist: SwitchPin::new(mist, level),
            air: SwitchPin::new(air, level),
        }
    }

    /// Sample the switches and combine them with potentiometer readings
    pub fn read(&mut self, mist_pot: u16, spit_pot: u16) -> RawInputs {
        RawInputs {
            mist_pot,
            spit_pot,
            fast: self.fast.is_closed(),
            mist: self.mist.is_closed(),
            air: self.air.is_closed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockInput;

    #[test]
    fn test_pull_up_contact() {
        let mut sw = SwitchPin::new(MockInput::new(true), ActiveLevel::Low);
        assert!(!sw.is_closed());

        sw.pin.high = false;
        assert!(sw.is_closed());
    }

    #[test]
    fn test_bank_read() {
        let mut bank = SwitchBank::new(
            MockInput::new(true),
            MockInput::new(false),
            MockInput::new(true),
            ActiveLevel::Low,
        );

        let raw = bank.read(100, 200);
        assert_eq!(
            raw,
            RawInputs {
                mist_pot: 100,
                spit_pot: 200,
                fast: false,
                mist: true,
                air: false,
            }
        );
    }
}
