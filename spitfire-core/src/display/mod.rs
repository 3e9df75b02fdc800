//! Display snapshot and refresh throttling
//!
//! The control loop builds a [`DisplaySnapshot`] every cycle but hands it
//! to the display adapter only when the [`DisplayThrottle`] allows, so
//! slow panel I/O never runs more often than the refresh period.

use core::fmt::Write;

use heapless::String;

use crate::safety::Fault;
use crate::state::Mode;
use crate::traits::DisplayError;

/// Width of one formatted status line
pub const STATUS_LINE_LEN: usize = 40;

/// Pump state as shown to the operator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySnapshot {
    pub mode: Mode,
    /// Mist demand, 0 to 100
    pub flow_percent: u8,
    /// Metered mist flow at the current demand, 0 when disabled
    pub flow_ml_per_hour: f32,
    /// Time left in a running spit
    pub spit_remaining_ms: Option<u32>,
    /// Spit duration the spit potentiometer currently selects
    pub spit_setting_ms: u32,
    pub air: bool,
    pub fault: Option<Fault>,
}

impl DisplaySnapshot {
    /// Format a one-line summary, e.g. `MIST  42%  17.3ml/h SPIT 4.5s`
    pub fn status_line(&self) -> Result<String<STATUS_LINE_LEN>, DisplayError> {
        let mut line = String::new();
        self.write_status(&mut line)
            .map_err(|_| DisplayError::BufferOverflow)?;
        Ok(line)
    }

    fn write_status<W: Write>(&self, w: &mut W) -> core::fmt::Result {
        if let Some(fault) = self.fault {
            return match fault {
                Fault::TimerLost => w.write_str("FAULT TIMER LOST"),
            };
        }

        write!(
            w,
            "{:<5}{:>3}% {:>5.1}ml/h",
            mode_label(self.mode),
            self.flow_percent,
            self.flow_ml_per_hour
        )?;

        // Running spit counts down; otherwise show the setting
        let spit_ms = self.spit_remaining_ms.unwrap_or(self.spit_setting_ms);
        write!(w, " SPIT {}.{}s", spit_ms / 1000, (spit_ms % 1000) / 100)?;

        if self.air && self.mode != Mode::Air {
            w.write_str(" +AIR")?;
        }
        Ok(())
    }
}

/// Short operator-facing name of a mode
pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Off => "OFF",
        Mode::Mist => "MIST",
        Mode::Fast => "FAST",
        Mode::Spit => "SPIT",
        Mode::Air => "AIR",
        Mode::Drain => "DRAIN",
    }
}

/// Rate limiter for display renders
#[derive(Debug, Clone)]
pub struct DisplayThrottle {
    period_ms: u32,
    last_ms: Option<u32>,
}

impl DisplayThrottle {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    /// Check if a render is due, and if so mark it as done
    ///
    /// The first call always renders.
    pub fn ready(&mut self, now_ms: u32) -> bool {
        let due = match self.last_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
            None => true,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(mode: Mode) -> DisplaySnapshot {
        DisplaySnapshot {
            mode,
            flow_percent: 42,
            flow_ml_per_hour: 17.3,
            spit_remaining_ms: None,
            spit_setting_ms: 4500,
            air: false,
            fault: None,
        }
    }

    #[test]
    fn test_throttle() {
        let mut throttle = DisplayThrottle::new(100);
        assert!(throttle.ready(0));
        assert!(!throttle.ready(50));
        assert!(!throttle.ready(99));
        assert!(throttle.ready(100));
        assert!(!throttle.ready(150));
        assert!(throttle.ready(250));
    }

    #[test]
    fn test_status_line() {
        let line = snapshot(Mode::Mist).status_line().unwrap();
        assert_eq!(line.as_str(), "MIST  42%  17.3ml/h SPIT 4.5s");
    }

    #[test]
    fn test_status_line_spit_countdown() {
        let mut snap = snapshot(Mode::Spit);
        snap.spit_remaining_ms = Some(1234);
        snap.air = true;
        let line = snap.status_line().unwrap();
        assert!(line.as_str().ends_with("SPIT 1.2s +AIR"));
    }

    #[test]
    fn test_status_line_fault() {
        let mut snap = snapshot(Mode::Off);
        snap.fault = Some(Fault::TimerLost);
        assert_eq!(snap.status_line().unwrap().as_str(), "FAULT TIMER LOST");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(mode_label(Mode::Drain), "DRAIN");
        assert_eq!(mode_label(Mode::Air), "AIR");
    }
}
