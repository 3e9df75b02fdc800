//! GPIO valve outputs
//!
//! Mist solenoid, air solenoid and spit LED, each on its own pin (directly
//! or via a MOSFET/relay board).

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use spitfire_core::outputs::ValveState;
use spitfire_core::traits::ValveOutputs;

use crate::pin::ActiveLevel;

/// Three GPIO outputs sharing one polarity
pub struct GpioValves<M, A, L> {
    mist: M,
    air: A,
    led: L,
    level: ActiveLevel,
    /// Last applied state, `None` before the first write
    state: Option<ValveState>,
}

impl<M, A, L> GpioValves<M, A, L>
where
    M: OutputPin<Error = Infallible>,
    A: OutputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
{
    /// Create the outputs, all inactive
    pub fn new(mist: M, air: A, led: L, level: ActiveLevel) -> Self {
        let mut valves = Self {
            mist,
            air,
            led,
            level,
            state: None,
        };
        // Ensure everything starts closed
        valves.apply(ValveState::closed());
        valves
    }

    /// Get the last applied state
    pub fn state(&self) -> ValveState {
        self.state.unwrap_or_default()
    }
}

impl<M, A, L> ValveOutputs for GpioValves<M, A, L>
where
    M: OutputPin<Error = Infallible>,
    A: OutputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
{
    fn apply(&mut self, state: ValveState) {
        let last = self.state;
        let changed = |f: fn(&ValveState) -> bool| last.map_or(true, |l| f(&l) != f(&state));

        if changed(|s| s.mist_valve) {
            self.mist
                .set_state(self.level.pin_state(state.mist_valve))
                .unwrap_or_else(|e| match e {});
        }
        if changed(|s| s.air_valve) {
            self.air
                .set_state(self.level.pin_state(state.air_valve))
                .unwrap_or_else(|e| match e {});
        }
        if changed(|s| s.spit_led) {
            self.led
                .set_state(self.level.pin_state(state.spit_led))
                .unwrap_or_else(|e| match e {});
        }

        self.state = Some(state);
    }
}
