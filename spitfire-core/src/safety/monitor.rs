//! Safety monitor implementation
//!
//! Watches the step timer heartbeat. The timer keeps firing while the
//! motor is idle, so silence always means the tick was lost.

/// Faults that stop the pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Step timer stopped calling back
    TimerLost,
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(Fault),
}

/// Step timer heartbeat monitor
///
/// Fed the timer callback counter once per control cycle. Once a fault is
/// reported it stays reported.
#[derive(Debug, Clone)]
pub struct TickMonitor {
    timeout_ms: u32,
    /// Counter value and the time it was first seen
    last: Option<(u32, u32)>,
    fault: Option<Fault>,
}

impl TickMonitor {
    /// Create a monitor
    ///
    /// # Arguments
    /// - `timeout_ms`: counter silence after which the tick is lost
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            last: None,
            fault: None,
        }
    }

    /// Feed the current tick count
    pub fn update(&mut self, ticks: u32, now_ms: u32) -> SafetyStatus {
        if self.fault.is_some() {
            return self.check();
        }

        match self.last {
            Some((seen, since_ms)) if seen == ticks => {
                if now_ms.wrapping_sub(since_ms) >= self.timeout_ms {
                    self.fault = Some(Fault::TimerLost);
                }
            }
            _ => self.last = Some((ticks, now_ms)),
        }

        self.check()
    }

    /// Check the current status without feeding a sample
    pub fn check(&self) -> SafetyStatus {
        match self.fault {
            Some(fault) => SafetyStatus::Fault(fault),
            None => SafetyStatus::Ok,
        }
    }
}
