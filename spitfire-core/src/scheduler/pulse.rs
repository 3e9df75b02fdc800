//! Step pulse generation
//!
//! Runs in the step timer context. Each callback reads the published
//! command once, emits at most one step and tells the timer when to fire
//! next. The period of the callback in progress is never changed, so a
//! new interval only takes effect from the following callback.

use super::command::SharedFlowCommand;
use crate::traits::{Direction, StepOutputs};

/// What one timer callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseAction {
    /// Motor disabled, no output change
    Idle,
    /// Direction output changed, step skipped
    DirectionChanged,
    /// One step emitted
    Stepped,
}

/// Timer-side step generator
#[derive(Debug, Clone)]
pub struct PulseGenerator {
    /// Direction last written to the output, `None` before the first write
    direction: Option<Direction>,
    idle_period_us: u32,
    steps: u32,
    last_action: PulseAction,
}

impl PulseGenerator {
    /// Create a generator
    ///
    /// `idle_period_us` is the callback period while the motor is disabled.
    pub fn new(idle_period_us: u32) -> Self {
        Self {
            direction: None,
            idle_period_us,
            steps: 0,
            last_action: PulseAction::Idle,
        }
    }

    /// Handle one timer callback
    ///
    /// Returns the period until the next callback in microseconds. Never
    /// blocks.
    pub fn on_timer<S: StepOutputs>(&mut self, shared: &SharedFlowCommand, outputs: &mut S) -> u32 {
        let command = shared.load();
        shared.tick();

        let Some(interval_us) = command.interval_us else {
            self.last_action = PulseAction::Idle;
            return self.idle_period_us;
        };

        if self.direction != Some(command.direction) {
            // Let the driver see the new direction before the next step
            outputs.set_direction(command.direction);
            self.direction = Some(command.direction);
            self.last_action = PulseAction::DirectionChanged;
        } else {
            outputs.pulse();
            self.steps = self.steps.wrapping_add(1);
            self.last_action = PulseAction::Stepped;
        }

        interval_us
    }

    /// Steps emitted so far, wrapping
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Direction currently on the output
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// What the last callback did
    pub fn last_action(&self) -> PulseAction {
        self.last_action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FlowCommand;

    #[derive(Default)]
    struct MockStep {
        pulses: u32,
        direction_writes: u32,
        direction: Option<Direction>,
    }

    impl StepOutputs for MockStep {
        fn set_direction(&mut self, dir: Direction) {
            self.direction = Some(dir);
            self.direction_writes += 1;
        }

        fn pulse(&mut self) {
            self.pulses += 1;
        }
    }

    #[test]
    fn test_disabled_polls_idle() {
        let shared = SharedFlowCommand::new();
        let mut gen = PulseGenerator::new(1000);
        let mut out = MockStep::default();

        assert_eq!(gen.on_timer(&shared, &mut out), 1000);
        assert_eq!(gen.last_action(), PulseAction::Idle);
        assert_eq!(out.pulses, 0);
        assert_eq!(shared.ticks(), 1);
    }

    #[test]
    fn test_one_step_per_callback() {
        let shared = SharedFlowCommand::new();
        shared.store(FlowCommand::running(125, Direction::Forward));
        let mut gen = PulseGenerator::new(1000);
        let mut out = MockStep::default();

        // First callback settles the direction
        assert_eq!(gen.on_timer(&shared, &mut out), 125);
        assert_eq!(gen.last_action(), PulseAction::DirectionChanged);
        assert_eq!(out.pulses, 0);

        for _ in 0..10 {
            assert_eq!(gen.on_timer(&shared, &mut out), 125);
        }
        assert_eq!(out.pulses, 10);
        assert_eq!(gen.steps(), 10);
        assert_eq!(out.direction_writes, 1);
    }

    #[test]
    fn test_direction_change_skips_step() {
        let shared = SharedFlowCommand::new();
        shared.store(FlowCommand::running(80, Direction::Forward));
        let mut gen = PulseGenerator::new(1000);
        let mut out = MockStep::default();

        gen.on_timer(&shared, &mut out);
        gen.on_timer(&shared, &mut out);
        assert_eq!(out.pulses, 1);

        shared.store(FlowCommand::running(80, Direction::Reverse));
        gen.on_timer(&shared, &mut out);
        assert_eq!(out.pulses, 1);
        assert_eq!(out.direction, Some(Direction::Reverse));
        assert_eq!(gen.direction(), Some(Direction::Reverse));

        gen.on_timer(&shared, &mut out);
        assert_eq!(out.pulses, 2);
    }

    #[test]
    fn test_new_interval_applies_to_next_period() {
        let shared = SharedFlowCommand::new();
        shared.store(FlowCommand::running(500, Direction::Forward));
        let mut gen = PulseGenerator::new(1000);
        let mut out = MockStep::default();

        assert_eq!(gen.on_timer(&shared, &mut out), 500);
        shared.store(FlowCommand::running(200, Direction::Forward));
        assert_eq!(gen.on_timer(&shared, &mut out), 200);
    }
}
