//! Virtual step timer
//!
//! Stands in for the hardware timer on the host: callbacks are run in
//! deadline order against a simulated microsecond clock, each one
//! scheduling the next with the period the generator returns.

use super::command::SharedFlowCommand;
use super::pulse::PulseGenerator;
use crate::traits::StepOutputs;

/// Deterministic periodic timer
#[derive(Debug, Clone)]
pub struct VirtualTimer {
    now_us: u64,
    next_us: u64,
    callbacks: u64,
    stopped: bool,
}

impl Default for VirtualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTimer {
    /// Create a timer whose first callback fires at time zero
    pub fn new() -> Self {
        Self {
            now_us: 0,
            next_us: 0,
            callbacks: 0,
            stopped: false,
        }
    }

    /// Run every callback due up to `until_us`
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance_to<S: StepOutputs>(
        &mut self,
        until_us: u64,
        generator: &mut PulseGenerator,
        shared: &SharedFlowCommand,
        outputs: &mut S,
    ) -> u64 {
        let mut ran = 0;
        while !self.stopped && self.next_us <= until_us {
            self.now_us = self.next_us;
            // A zero period would never let time advance
            let period = generator.on_timer(shared, outputs).max(1);
            self.next_us = self.now_us + period as u64;
            ran += 1;
        }
        self.callbacks += ran;
        self.now_us = self.now_us.max(until_us);
        ran
    }

    /// Stop firing, as if the timer interrupt were lost
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Current simulated time
    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Deadline of the next callback
    pub fn next_deadline_us(&self) -> u64 {
        self.next_us
    }

    /// Callbacks run so far
    pub fn callbacks(&self) -> u64 {
        self.callbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FlowCommand;
    use crate::traits::Direction;

    #[derive(Default)]
    struct Counter {
        pulses: u32,
    }

    impl StepOutputs for Counter {
        fn set_direction(&mut self, _dir: Direction) {}

        fn pulse(&mut self) {
            self.pulses += 1;
        }
    }

    #[test]
    fn test_even_spacing() {
        let shared = SharedFlowCommand::new();
        shared.store(FlowCommand::running(125, Direction::Forward));
        let mut gen = PulseGenerator::new(1000);
        let mut timer = VirtualTimer::new();
        let mut out = Counter::default();

        // Callbacks at 0, 125, ..., 10_000; the first settles direction
        let ran = timer.advance_to(10_000, &mut gen, &shared, &mut out);
        assert_eq!(ran, 81);
        assert_eq!(out.pulses, 80);
        assert_eq!(timer.next_deadline_us(), 10_125);
    }

    #[test]
    fn test_idle_polling() {
        let shared = SharedFlowCommand::new();
        let mut gen = PulseGenerator::new(1000);
        let mut timer = VirtualTimer::new();
        let mut out = Counter::default();

        let ran = timer.advance_to(4_999, &mut gen, &shared, &mut out);
        assert_eq!(ran, 5);
        assert_eq!(shared.ticks(), 5);
        assert_eq!(out.pulses, 0);
    }

    #[test]
    fn test_stopped_timer_is_silent() {
        let shared = SharedFlowCommand::new();
        let mut gen = PulseGenerator::new(1000);
        let mut timer = VirtualTimer::new();
        let mut out = Counter::default();

        timer.stop();
        assert_eq!(timer.advance_to(100_000, &mut gen, &shared, &mut out), 0);
        assert_eq!(shared.ticks(), 0);
        assert_eq!(timer.now_us(), 100_000);
    }
}
