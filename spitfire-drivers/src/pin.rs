//! Pin polarity

use embedded_hal::digital::PinState;

/// Electrical level that means "active" on a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Active when high (direct MOSFET gate, normally open contact to VCC)
    #[default]
    High,
    /// Active when low (A4988/TMC enable, contact to ground with pull-up)
    Low,
}

impl ActiveLevel {
    /// Pin state that represents the logical value
    pub fn pin_state(self, active: bool) -> PinState {
        PinState::from(active == (self == ActiveLevel::High))
    }

    /// Logical value of a sampled pin level
    pub fn is_active(self, high: bool) -> bool {
        high == (self == ActiveLevel::High)
    }
}
