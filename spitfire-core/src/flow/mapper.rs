//! Demand to step interval mapping
//!
//! Flow is inversely proportional to the step interval. The fastest mist
//! interval delivers `max_ml_per_hour`; the slowest one is scaled from it by
//! the flow ratio and delivers `min_ml_per_hour`.

use crate::config::{ControlCurve, PumpConfig};
use crate::scheduler::FlowCommand;
use crate::state::Mode;

/// Converts operator demand into step intervals
#[derive(Debug, Clone)]
pub struct FlowMapper {
    curve: ControlCurve,
    min_interval_us: u32,
    max_interval_us: u32,
    min_fraction: f32,
    max_ml_per_hour: f32,
    fast_interval_us: u32,
    spit_interval_us: u32,
}

impl FlowMapper {
    /// Create a mapper for a validated configuration
    pub fn new(config: &PumpConfig) -> Self {
        let min_interval_us = config.min_flow_interval_us;
        let max_interval_us = config
            .max_flow_interval_us()
            .unwrap_or(min_interval_us)
            .max(min_interval_us);

        Self {
            curve: config.control_curve,
            min_interval_us,
            max_interval_us,
            min_fraction: config.min_flow_fraction(),
            max_ml_per_hour: config.max_ml_per_hour as f32,
            fast_interval_us: config.fast_flow_interval_us,
            spit_interval_us: config.spit_flow_interval_us,
        }
    }

    /// Map mist demand to a step interval
    ///
    /// Returns `None` when the demand is below the minimum meaningful flow.
    /// Otherwise the result lies in `[min_interval_us, max_interval_us]`.
    pub fn interval(&self, pct: f32) -> Option<u32> {
        let pct = normalize(pct);
        if pct < self.min_fraction {
            return None;
        }

        let min = self.min_interval_us as f32;
        let max = self.max_interval_us as f32;
        let raw = match self.curve {
            ControlCurve::Linear => max - pct * (max - min),
            ControlCurve::Exponential => max * libm::powf(min / max, pct),
        };

        let interval = libm::roundf(raw) as u32;
        Some(interval.clamp(self.min_interval_us, self.max_interval_us))
    }

    /// Check if the demand is high enough to run the motor
    pub fn is_flowing(&self, pct: f32) -> bool {
        self.interval(pct).is_some()
    }

    /// Metered flow at the given demand, 0 when disabled
    pub fn ml_per_hour(&self, pct: f32) -> f32 {
        match self.interval(pct) {
            Some(interval) => {
                self.max_ml_per_hour * self.min_interval_us as f32 / interval as f32
            }
            None => 0.0,
        }
    }

    /// Flow command for a resolved mode
    ///
    /// Only Mist follows the potentiometer; Fast, Spit and Drain run at
    /// their fixed intervals.
    pub fn command(&self, mode: Mode, mist_pct: f32) -> FlowCommand {
        if !mode.motor_running() {
            return FlowCommand::disabled();
        }

        let interval = match mode {
            Mode::Mist => self.interval(mist_pct),
            Mode::Spit => Some(self.spit_interval_us),
            // Fast and Drain
            _ => Some(self.fast_interval_us),
        };
        match interval {
            Some(interval) => FlowCommand::running(interval, mode.direction()),
            None => FlowCommand::disabled(),
        }
    }

    /// Step interval for Fast and Drain
    pub fn fast_interval(&self) -> u32 {
        self.fast_interval_us
    }

    /// Step interval for Spit
    pub fn spit_interval(&self) -> u32 {
        self.spit_interval_us
    }

    /// Shortest mist interval
    pub fn min_interval(&self) -> u32 {
        self.min_interval_us
    }

    /// Longest mist interval
    pub fn max_interval(&self) -> u32 {
        self.max_interval_us
    }
}

/// Clamp demand to [0, 1], treating NaN as no demand
fn normalize(pct: f32) -> f32 {
    if pct.is_nan() {
        0.0
    } else {
        pct.clamp(0.0, 1.0)
    }
}
