//! Valve and indicator logic
//!
//! Pure combinational mapping from mode and air flag to output levels.

use crate::state::Mode;

/// Logical output levels (true = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValveState {
    pub mist_valve: bool,
    pub air_valve: bool,
    pub spit_led: bool,
}

impl ValveState {
    /// All outputs inactive
    pub const fn closed() -> Self {
        Self {
            mist_valve: false,
            air_valve: false,
            spit_led: false,
        }
    }

    /// Outputs for a mode and the air-only flag
    pub fn for_mode(mode: Mode, air: bool) -> Self {
        Self {
            mist_valve: mode.mist_valve(),
            air_valve: air || mode.needs_air() || mode == Mode::Air,
            spit_led: mode == Mode::Spit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_is_closed() {
        assert_eq!(ValveState::for_mode(Mode::Off, false), ValveState::closed());
    }

    #[test]
    fn test_mist() {
        let state = ValveState::for_mode(Mode::Mist, false);
        assert!(state.mist_valve);
        assert!(!state.air_valve);
        assert!(!state.spit_led);

        // Air flag is OR'd in
        assert!(ValveState::for_mode(Mode::Mist, true).air_valve);
    }

    #[test]
    fn test_spit_and_fast_use_air() {
        let spit = ValveState::for_mode(Mode::Spit, false);
        assert!(spit.mist_valve && spit.air_valve && spit.spit_led);

        let fast = ValveState::for_mode(Mode::Fast, false);
        assert!(fast.mist_valve && fast.air_valve && !fast.spit_led);
    }

    #[test]
    fn test_air_only() {
        let state = ValveState::for_mode(Mode::Air, true);
        assert!(state.air_valve);
        assert!(!state.mist_valve);
    }

    #[test]
    fn test_drain_opens_nothing() {
        assert_eq!(ValveState::for_mode(Mode::Drain, false), ValveState::closed());
    }
}
