//! Configuration type definitions
//!
//! The pump is configured once at startup. Everything that used to be a
//! build-time switch (curve, switch discipline, drain, external mist
//! control) is a field here and is validated before the motor is armed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operator response curve for the mist potentiometer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlCurve {
    /// Interval falls linearly with knob position
    Linear,
    /// Interval falls geometrically, so each knob increment changes the
    /// flow by the same ratio
    #[default]
    Exponential,
}

/// Contact discipline for the mist and air switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchMode {
    /// Toggle switches: the contact level is the request
    #[default]
    Maintained,
    /// Push buttons: each press flips a latched request
    Momentary,
}

/// Pump configuration
///
/// Intervals are step periods in microseconds, durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PumpConfig {
    /// Step period at `max_ml_per_hour` (shortest mist interval)
    pub min_flow_interval_us: u32,
    /// Step period in Fast and Drain
    pub fast_flow_interval_us: u32,
    /// Step period in Spit
    pub spit_flow_interval_us: u32,
    /// Shortest spit burst
    pub spit_min_time_ms: u32,
    /// Longest spit burst
    pub spit_max_time_ms: u32,
    /// Lowest meaningful mist flow; demand below this disables the motor
    pub min_ml_per_hour: u16,
    /// Mist flow delivered at `min_flow_interval_us` (metered on the bench)
    pub max_ml_per_hour: u16,
    /// Potentiometer EMA factor, `0 < alpha <= 1`
    pub smoothing_alpha: f32,
    /// Minimum time between two display renders
    pub display_refresh_ms: u32,
    /// Time a switch level must hold before it is accepted
    pub debounce_ms: u32,
    /// Mist potentiometer response curve
    pub control_curve: ControlCurve,
    /// Discipline of the mist and air switches
    pub switch_mode: SwitchMode,
    /// Run a reverse drain when mist demand is turned down to zero
    pub drain_on_zero: bool,
    /// How long the drain runs
    pub drain_duration_ms: u32,
    /// Use the air input as an external mist enable (e.g. from the CNC)
    pub external_mist_control: bool,
    /// Treat each mist activation as a spit trigger (priming burst)
    pub spit_on_mist_start: bool,
    /// Full-scale reading of the potentiometer ADC
    pub adc_full_scale: u16,
    /// Shortest period the step timer can schedule
    pub min_timer_period_us: u32,
    /// Step timer period while the motor is disabled
    pub idle_poll_period_us: u32,
    /// Step timer silence after which the tick is declared lost
    pub tick_timeout_ms: u32,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            min_flow_interval_us: 125,
            fast_flow_interval_us: 80,
            spit_flow_interval_us: 80,
            spit_min_time_ms: 1000,
            spit_max_time_ms: 8000,
            min_ml_per_hour: 1,
            max_ml_per_hour: 250,
            smoothing_alpha: 0.05,
            display_refresh_ms: 100,
            debounce_ms: 30,
            control_curve: ControlCurve::Exponential,
            switch_mode: SwitchMode::Maintained,
            drain_on_zero: true,
            drain_duration_ms: 3000,
            external_mist_control: false,
            spit_on_mist_start: true,
            adc_full_scale: 4095,
            min_timer_period_us: 20,
            idle_poll_period_us: 1000,
            tick_timeout_ms: 50,
        }
    }
}

impl PumpConfig {
    /// Step period at `min_ml_per_hour` (longest mist interval)
    ///
    /// Flow is inversely proportional to the step period, so the slowest
    /// interval scales the fastest one by the flow ratio. Returns `None`
    /// when `min_ml_per_hour` is zero or the result does not fit in `u32`.
    pub fn max_flow_interval_us(&self) -> Option<u32> {
        if self.min_ml_per_hour == 0 {
            return None;
        }
        let interval = (self.min_flow_interval_us as u64) * (self.max_ml_per_hour as u64)
            / (self.min_ml_per_hour as u64);
        u32::try_from(interval).ok()
    }

    /// Fraction of full demand below which the motor is disabled
    pub fn min_flow_fraction(&self) -> f32 {
        if self.max_ml_per_hour == 0 {
            return 1.0;
        }
        self.min_ml_per_hour as f32 / self.max_ml_per_hour as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_bounds() {
        let config = PumpConfig::default();
        assert_eq!(config.min_flow_interval_us, 125);
        assert_eq!(config.max_flow_interval_us(), Some(125 * 250));
    }

    #[test]
    fn test_max_interval_rejects_zero_min_flow() {
        let config = PumpConfig {
            min_ml_per_hour: 0,
            ..Default::default()
        };
        assert_eq!(config.max_flow_interval_us(), None);
    }

    #[test]
    fn test_min_flow_fraction() {
        let config = PumpConfig {
            min_ml_per_hour: 25,
            max_ml_per_hour: 250,
            ..Default::default()
        };
        assert_eq!(config.min_flow_fraction(), 0.1);
    }
}
