//! Step timer deadline tracking
//!
//! Deadlines are accumulated from the previous deadline rather than from
//! the wakeup time, so the pulse train does not drift with wakeup latency.
//! A deadline that is already in the past when it is computed is an
//! overrun: the tracker resyncs to the current time instead of bursting
//! the missed callbacks, and counts the event.

/// Absolute deadline of the next step timer callback
#[derive(Debug, Clone)]
pub struct StepDeadline {
    next_us: u64,
    overruns: u32,
}

impl StepDeadline {
    /// Start tracking with the first callback due at `start_us`
    pub fn new(start_us: u64) -> Self {
        Self {
            next_us: start_us,
            overruns: 0,
        }
    }

    /// Schedule the next callback `period_us` after the current deadline
    ///
    /// Returns how late the deadline already was on an overrun.
    pub fn advance(&mut self, period_us: u32, now_us: u64) -> Option<u64> {
        self.next_us += period_us as u64;
        if self.next_us < now_us {
            let late_us = now_us - self.next_us;
            self.next_us = now_us;
            self.overruns = self.overruns.saturating_add(1);
            return Some(late_us);
        }
        None
    }

    /// Deadline of the next callback
    pub fn next_us(&self) -> u64 {
        self.next_us
    }

    /// Number of overruns so far
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
