//! Main controller coordinating inputs, modes, step scheduling and safety
//!
//! One call to [`Controller::cycle`] is one pass of the control loop:
//! - Samples and filters the operator inputs
//! - Checks the step timer heartbeat
//! - Updates the mode state machine
//! - Publishes the flow command for the step timer
//! - Drives the valves and indicator
//! - Hands a throttled snapshot to the display

use crate::config::{ConfigError, PumpConfig};
use crate::display::{DisplaySnapshot, DisplayThrottle};
use crate::flow::FlowMapper;
use crate::input::{InputSampler, RawInputs, SampledInputs};
use crate::outputs::ValveState;
use crate::safety::{Fault, SafetyStatus, TickMonitor};
use crate::scheduler::{FlowCommand, SharedFlowCommand, StepScheduler};
use crate::state::{ModeController, ModeInputs, Mode, Transitions};
use crate::traits::{DisplayAdapter, DisplayError, EnableOutput, ValveOutputs};

/// Outputs owned by the control loop
pub struct ControlOutputs<E, V, D> {
    pub enable: E,
    pub valves: V,
    pub display: D,
}

/// What one control cycle did
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Mode after this cycle
    pub mode: Mode,
    /// Command published to the step timer, after clamping
    pub command: FlowCommand,
    /// The requested interval was below the timer minimum
    pub clamped: bool,
    /// Latched fault, if any
    pub fault: Option<Fault>,
    /// Fault detected on this cycle
    pub new_fault: bool,
    /// Render result when the display was refreshed on this cycle
    pub display: Option<Result<(), DisplayError>>,
    /// Mode transitions applied on this cycle
    pub transitions: Transitions,
    /// Filtered inputs used for this cycle
    pub inputs: SampledInputs,
}

/// Control loop state
pub struct Controller<'a, E, V, D> {
    config: PumpConfig,
    shared: &'a SharedFlowCommand,
    sampler: InputSampler,
    mapper: FlowMapper,
    modes: ModeController,
    scheduler: StepScheduler<'a>,
    monitor: TickMonitor,
    throttle: DisplayThrottle,
    outputs: ControlOutputs<E, V, D>,
}

impl<'a, E, V, D> Controller<'a, E, V, D>
where
    E: EnableOutput,
    V: ValveOutputs,
    D: DisplayAdapter,
{
    /// Create a controller
    ///
    /// The configuration is validated first; on error nothing is armed.
    /// On success the motor starts disabled and all valves closed.
    pub fn new(
        config: PumpConfig,
        shared: &'a SharedFlowCommand,
        outputs: ControlOutputs<E, V, D>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut controller = Self {
            config,
            shared,
            sampler: InputSampler::new(&config),
            mapper: FlowMapper::new(&config),
            modes: ModeController::new(&config),
            scheduler: StepScheduler::new(shared, config.min_timer_period_us),
            monitor: TickMonitor::new(config.tick_timeout_ms),
            throttle: DisplayThrottle::new(config.display_refresh_ms),
            outputs,
        };

        controller.scheduler.force_disable(&mut controller.outputs.enable);
        controller.outputs.valves.apply(ValveState::closed());
        Ok(controller)
    }

    /// Run one control cycle
    pub fn cycle(&mut self, raw: &RawInputs, now_ms: u32) -> CycleReport {
        let inputs = self.sampler.sample(raw, now_ms);
        let mist_pct = inputs.mist_pot.percent;
        let mut transitions = Transitions::new();

        // Safety first: a lost tick stops the motor before anything else
        let mut new_fault = false;
        if let SafetyStatus::Fault(fault) = self.monitor.update(self.shared.ticks(), now_ms) {
            if self.modes.fault().is_none() {
                new_fault = true;
                if let Some(t) = self.modes.force_off(fault) {
                    let _ = transitions.push(t);
                }
            }
        }

        let mode_inputs = ModeInputs {
            requests: inputs.requests,
            mist_flowing: self.mapper.is_flowing(mist_pct),
            spit_percent: inputs.spit_pot.percent,
        };
        for t in self.modes.update(&mode_inputs, now_ms) {
            let _ = transitions.push(t);
        }

        let mode = self.modes.mode();
        let fault = self.modes.fault();

        let clamped = if fault.is_some() {
            self.scheduler.force_disable(&mut self.outputs.enable);
            false
        } else {
            let command = self.mapper.command(mode, mist_pct);
            self.scheduler.publish(command, &mut self.outputs.enable)
        };

        let valves = match fault {
            Some(_) => ValveState::closed(),
            None => ValveState::for_mode(mode, self.modes.air()),
        };
        self.outputs.valves.apply(valves);

        let display = if self.throttle.ready(now_ms) {
            let snapshot = self.snapshot(now_ms);
            Some(self.outputs.display.render(&snapshot))
        } else {
            None
        };

        CycleReport {
            mode,
            command: self.scheduler.published(),
            clamped,
            fault,
            new_fault,
            display,
            transitions,
            inputs,
        }
    }

    /// Queue a spit for the next cycle (ignored outside Mist)
    pub fn request_spit(&mut self) {
        self.modes.request_spit();
    }

    /// Build the display snapshot for the current state
    pub fn snapshot(&self, now_ms: u32) -> DisplaySnapshot {
        let mist_pct = self.sampler.mist_reading().percent;
        let spit_pct = self.sampler.spit_reading().percent;
        let flowing = self.mapper.is_flowing(mist_pct);

        DisplaySnapshot {
            mode: self.modes.mode(),
            flow_percent: if flowing {
                libm::roundf(mist_pct * 100.0) as u8
            } else {
                0
            },
            flow_ml_per_hour: self.mapper.ml_per_hour(mist_pct),
            spit_remaining_ms: self.modes.spit_remaining_ms(now_ms),
            spit_setting_ms: self.modes.spit_preview_ms(spit_pct),
            air: self.modes.air(),
            fault: self.modes.fault(),
        }
    }

    /// Get the active mode
    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    /// Get the latched fault, if any
    pub fn fault(&self) -> Option<Fault> {
        self.modes.fault()
    }

    /// Last command published to the step timer
    pub fn published(&self) -> FlowCommand {
        self.scheduler.published()
    }

    /// Number of cycles whose interval needed clamping
    pub fn clamp_count(&self) -> u32 {
        self.scheduler.clamp_count()
    }

    /// Configuration in use
    pub fn config(&self) -> &PumpConfig {
        &self.config
    }

    /// Outputs owned by the control loop
    pub fn outputs(&self) -> &ControlOutputs<E, V, D> {
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoDisplay;

    #[derive(Default)]
    struct Enable(bool);

    impl EnableOutput for Enable {
        fn set_enabled(&mut self, enabled: bool) {
            self.0 = enabled;
        }

        fn is_enabled(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct Valves(ValveState);

    impl ValveOutputs for Valves {
        fn apply(&mut self, state: ValveState) {
            self.0 = state;
        }
    }

    fn outputs() -> ControlOutputs<Enable, Valves, NoDisplay> {
        ControlOutputs {
            enable: Enable::default(),
            valves: Valves::default(),
            display: NoDisplay,
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let shared = SharedFlowCommand::new();
        let config = PumpConfig {
            spit_min_time_ms: 9000,
            ..Default::default()
        };

        let result = Controller::new(config, &shared, outputs());
        assert_eq!(result.err(), Some(ConfigError::SpitTimesInverted));
        assert_eq!(shared.load(), FlowCommand::disabled());
    }

    #[test]
    fn test_starts_disarmed() {
        let shared = SharedFlowCommand::new();
        let mut ctrl = Controller::new(PumpConfig::default(), &shared, outputs()).unwrap();

        let report = ctrl.cycle(&RawInputs::default(), 0);
        assert_eq!(report.mode, Mode::Off);
        assert_eq!(report.command, FlowCommand::disabled());
        assert!(!ctrl.outputs().enable.is_enabled());
        assert_eq!(ctrl.outputs().valves.0, ValveState::closed());
        assert_eq!(report.display, Some(Ok(())));
    }

    #[test]
    fn test_fast_arms_motor() {
        let shared = SharedFlowCommand::new();
        let config = PumpConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        let mut ctrl = Controller::new(config, &shared, outputs()).unwrap();

        let raw = RawInputs {
            fast: true,
            ..Default::default()
        };
        let report = ctrl.cycle(&raw, 0);
        assert_eq!(report.mode, Mode::Fast);
        assert_eq!(report.command.interval_us, Some(80));
        assert!(ctrl.outputs().enable.is_enabled());
        assert!(ctrl.outputs().valves.0.air_valve);
    }
}
