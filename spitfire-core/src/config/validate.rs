//! Startup configuration checks
//!
//! An inconsistent configuration is fatal: the pump refuses to arm the
//! motor rather than run under ambiguous bounds.

use core::fmt;

use super::types::{PumpConfig, SwitchMode};
use crate::scheduler::MAX_INTERVAL_US;

/// Configuration errors detected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min_ml_per_hour` is zero
    ZeroMinFlow,
    /// `min_ml_per_hour` is not below `max_ml_per_hour`
    FlowBoundsInverted,
    /// `spit_min_time_ms` exceeds `spit_max_time_ms`
    SpitTimesInverted,
    /// `smoothing_alpha` is outside (0, 1]
    SmoothingOutOfRange,
    /// A step interval is zero
    ZeroInterval,
    /// The slowest mist interval does not fit the command encoding
    IntervalOverflow,
    /// `adc_full_scale` is zero
    ZeroAdcRange,
    /// Drain is enabled with a zero duration
    ZeroDrainDuration,
    /// External mist control needs momentary mist and air inputs
    ExternalMistNeedsMomentary,
    /// The idle poll period is shorter than the timer can resolve
    IdlePollTooShort,
    /// `tick_timeout_ms` is zero
    ZeroTickTimeout,
    /// A step timer period is as long as `tick_timeout_ms`
    TickTimeoutTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::ZeroMinFlow => "min_ml_per_hour must be greater than zero",
            ConfigError::FlowBoundsInverted => "min_ml_per_hour must be below max_ml_per_hour",
            ConfigError::SpitTimesInverted => "spit_min_time exceeds spit_max_time",
            ConfigError::SmoothingOutOfRange => "smoothing_alpha must be in (0, 1]",
            ConfigError::ZeroInterval => "step intervals must be greater than zero",
            ConfigError::IntervalOverflow => "slowest mist interval is too long",
            ConfigError::ZeroAdcRange => "adc_full_scale must be greater than zero",
            ConfigError::ZeroDrainDuration => "drain_on_zero needs a drain duration",
            ConfigError::ExternalMistNeedsMomentary => {
                "external mist control requires momentary switches"
            }
            ConfigError::IdlePollTooShort => "idle poll period is below the timer resolution",
            ConfigError::ZeroTickTimeout => "tick_timeout_ms must be greater than zero",
            ConfigError::TickTimeoutTooShort => {
                "tick_timeout_ms must exceed the slowest step timer period"
            }
        };
        f.write_str(msg)
    }
}

impl PumpConfig {
    /// Check the configuration for internal consistency
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ml_per_hour == 0 {
            return Err(ConfigError::ZeroMinFlow);
        }
        if self.min_ml_per_hour >= self.max_ml_per_hour {
            return Err(ConfigError::FlowBoundsInverted);
        }
        if self.spit_min_time_ms > self.spit_max_time_ms {
            return Err(ConfigError::SpitTimesInverted);
        }
        // Written so that NaN fails as well
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange);
        }
        if self.min_flow_interval_us == 0
            || self.fast_flow_interval_us == 0
            || self.spit_flow_interval_us == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        match self.max_flow_interval_us() {
            Some(max) if max <= MAX_INTERVAL_US => {}
            _ => return Err(ConfigError::IntervalOverflow),
        }
        if self.fast_flow_interval_us > MAX_INTERVAL_US
            || self.spit_flow_interval_us > MAX_INTERVAL_US
            || self.idle_poll_period_us > MAX_INTERVAL_US
        {
            return Err(ConfigError::IntervalOverflow);
        }
        if self.adc_full_scale == 0 {
            return Err(ConfigError::ZeroAdcRange);
        }
        if self.drain_on_zero && self.drain_duration_ms == 0 {
            return Err(ConfigError::ZeroDrainDuration);
        }
        if self.external_mist_control && self.switch_mode != SwitchMode::Momentary {
            return Err(ConfigError::ExternalMistNeedsMomentary);
        }
        if self.idle_poll_period_us < self.min_timer_period_us.max(1) {
            return Err(ConfigError::IdlePollTooShort);
        }
        if self.tick_timeout_ms == 0 {
            return Err(ConfigError::ZeroTickTimeout);
        }
        // The heartbeat moves once per timer callback
        if self.longest_timer_period_us() as u64 >= self.tick_timeout_ms as u64 * 1000 {
            return Err(ConfigError::TickTimeoutTooShort);
        }
        Ok(())
    }

    /// Longest period the step timer can run with, idle or stepping
    pub fn longest_timer_period_us(&self) -> u32 {
        self.max_flow_interval_us()
            .unwrap_or(u32::MAX)
            .max(self.fast_flow_interval_us)
            .max(self.spit_flow_interval_us)
            .max(self.idle_poll_period_us)
    }
}
