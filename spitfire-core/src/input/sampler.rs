//! Input sampler
//!
//! Runs once per control cycle: filters both potentiometers, debounces the
//! three switches and resolves them into operator requests.

use super::debounce::Edge;
use super::smoothing::{Potentiometer, PotentiometerReading};
use super::switch::{AnySwitch, MaintainedSwitch, SwitchReader, SwitchState};
use crate::config::PumpConfig;

/// Raw input levels for one control cycle
///
/// Switch levels are logical (true = contact closed), already corrected
/// for the wiring polarity by the input driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    /// Mist potentiometer ADC counts
    pub mist_pot: u16,
    /// Spit potentiometer ADC counts
    pub spit_pot: u16,
    /// Fast switch contact
    pub fast: bool,
    /// Mist switch contact
    pub mist: bool,
    /// Air switch contact (external mist enable line when configured)
    pub air: bool,
}

/// Operator requests resolved from the switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Requests {
    /// Fast purge is held
    pub fast: bool,
    /// Mist is requested
    pub mist: bool,
    /// Edge of the mist request on this cycle
    pub mist_edge: Option<Edge>,
    /// Air-only flag is set
    pub air: bool,
}

/// Everything the sampler publishes for one control cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampledInputs {
    pub mist_pot: PotentiometerReading,
    pub spit_pot: PotentiometerReading,
    pub fast: SwitchState,
    pub mist: SwitchState,
    pub air: SwitchState,
    pub requests: Requests,
}

/// Per-cycle input filtering
#[derive(Debug, Clone)]
pub struct InputSampler {
    mist_pot: Potentiometer,
    spit_pot: Potentiometer,
    fast: MaintainedSwitch,
    mist: AnySwitch,
    air: AnySwitch,
    external_mist_control: bool,
    mist_request: bool,
}

impl InputSampler {
    /// Create a sampler for a validated configuration
    pub fn new(config: &PumpConfig) -> Self {
        // The external enable line is a level from the machine, not a button
        let air = if config.external_mist_control {
            AnySwitch::Maintained(MaintainedSwitch::new(config.debounce_ms))
        } else {
            AnySwitch::new(config.switch_mode, config.debounce_ms)
        };

        Self {
            mist_pot: Potentiometer::new(config.smoothing_alpha, config.adc_full_scale),
            spit_pot: Potentiometer::new(config.smoothing_alpha, config.adc_full_scale),
            fast: MaintainedSwitch::new(config.debounce_ms),
            mist: AnySwitch::new(config.switch_mode, config.debounce_ms),
            air,
            external_mist_control: config.external_mist_control,
            mist_request: false,
        }
    }

    /// Sample all inputs once
    pub fn sample(&mut self, raw: &RawInputs, now_ms: u32) -> SampledInputs {
        let mist_pot = self.mist_pot.sample(raw.mist_pot);
        let spit_pot = self.spit_pot.sample(raw.spit_pot);
        let fast = self.fast.update(raw.fast, now_ms);
        let mist = self.mist.update(raw.mist, now_ms);
        let air = self.air.update(raw.air, now_ms);

        let (mist_request, air_flag) = if self.external_mist_control {
            (mist.active && air.active, false)
        } else {
            (mist.active, air.active)
        };

        let mist_edge = match (self.mist_request, mist_request) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        };
        self.mist_request = mist_request;

        SampledInputs {
            mist_pot,
            spit_pot,
            fast,
            mist,
            air,
            requests: Requests {
                fast: fast.active,
                mist: mist_request,
                mist_edge,
                air: air_flag,
            },
        }
    }

    /// Get the last mist potentiometer reading
    pub fn mist_reading(&self) -> PotentiometerReading {
        self.mist_pot.reading()
    }

    /// Get the last spit potentiometer reading
    pub fn spit_reading(&self) -> PotentiometerReading {
        self.spit_pot.reading()
    }
}
