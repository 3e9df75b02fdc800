//! Main-loop side of the step scheduler
//!
//! Publishes flow commands to the step timer and owns the enable output.
//! Intervals the timer cannot resolve are raised to its minimum period and
//! reported.

use super::command::{FlowCommand, SharedFlowCommand};
use crate::traits::EnableOutput;

/// Publishes commands for the step timer
#[derive(Debug)]
pub struct StepScheduler<'a> {
    shared: &'a SharedFlowCommand,
    min_period_us: u32,
    published: FlowCommand,
    clamp_count: u32,
}

impl<'a> StepScheduler<'a> {
    /// Create a scheduler over the shared command
    ///
    /// `min_period_us` is the shortest period the step timer can schedule.
    pub fn new(shared: &'a SharedFlowCommand, min_period_us: u32) -> Self {
        Self {
            shared,
            min_period_us,
            published: FlowCommand::disabled(),
            clamp_count: 0,
        }
    }

    /// Publish a command
    ///
    /// Enable is asserted before an enabling command becomes visible and
    /// dropped only after a disabling command is visible, so the timer
    /// never steps a disabled driver.
    ///
    /// Returns true if the interval was clamped.
    pub fn publish<E: EnableOutput>(&mut self, command: FlowCommand, enable: &mut E) -> bool {
        let (command, clamped) = self.clamp(command);
        if clamped {
            self.clamp_count = self.clamp_count.saturating_add(1);
        }

        if command.enabled() {
            if !enable.is_enabled() {
                enable.set_enabled(true);
            }
            self.shared.store(command);
        } else {
            self.shared.store(command);
            if enable.is_enabled() {
                enable.set_enabled(false);
            }
        }

        self.published = command;
        clamped
    }

    /// Stop the motor unconditionally
    pub fn force_disable<E: EnableOutput>(&mut self, enable: &mut E) {
        self.shared.store(FlowCommand::disabled());
        enable.set_enabled(false);
        self.published = FlowCommand::disabled();
    }

    /// Last published command, after clamping
    pub fn published(&self) -> FlowCommand {
        self.published
    }

    /// Number of publishes that needed clamping
    pub fn clamp_count(&self) -> u32 {
        self.clamp_count
    }

    fn clamp(&self, command: FlowCommand) -> (FlowCommand, bool) {
        match command.interval_us {
            Some(interval) if interval < self.min_period_us => (
                FlowCommand::running(self.min_period_us, command.direction),
                true,
            ),
            _ => (command, false),
        }
    }
}
