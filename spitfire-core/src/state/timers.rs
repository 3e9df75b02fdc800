//! Spit and drain timing
//!
//! Both timers are fixed at creation and compared against the wrapping
//! millisecond clock.

/// Spit duration selected by the spit potentiometer
///
/// Linear between the bounds and always within them.
pub fn spit_duration_ms(pct: f32, min_ms: u32, max_ms: u32) -> u32 {
    let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 1.0) };
    let span = max_ms.saturating_sub(min_ms) as f32;
    let duration = min_ms as f32 + libm::roundf(pct * span);

    // f32 loses precision for large bounds; the clamp keeps the contract
    (duration as u32).clamp(min_ms, max_ms.max(min_ms))
}

/// Running spit burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpitTimer {
    start_ms: u32,
    duration_ms: u32,
}

impl SpitTimer {
    /// Start a spit at `now_ms` with the duration selected by `pct`
    pub fn start(now_ms: u32, pct: f32, min_ms: u32, max_ms: u32) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms: spit_duration_ms(pct, min_ms, max_ms),
        }
    }

    /// Duration fixed at entry
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Time since the spit started
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// Time left before the spit ends
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.duration_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Check if the spit has run its full duration
    pub fn is_expired(&self, now_ms: u32) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }
}

/// Running drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainTimer {
    start_ms: u32,
    duration_ms: u32,
}

impl DrainTimer {
    pub fn start(now_ms: u32, duration_ms: u32) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms,
        }
    }

    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.duration_ms
            .saturating_sub(now_ms.wrapping_sub(self.start_ms))
    }

    pub fn is_finished(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.start_ms) >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spit_duration_bounds() {
        assert_eq!(spit_duration_ms(0.0, 1000, 8000), 1000);
        assert_eq!(spit_duration_ms(1.0, 1000, 8000), 8000);
        assert_eq!(spit_duration_ms(0.5, 1000, 8000), 4500);
        assert_eq!(spit_duration_ms(2.0, 1000, 8000), 8000);
        assert_eq!(spit_duration_ms(f32::NAN, 1000, 8000), 1000);
    }

    #[test]
    fn test_spit_timer_expiry() {
        let timer = SpitTimer::start(500, 0.0, 1000, 8000);
        assert_eq!(timer.duration_ms(), 1000);
        assert!(!timer.is_expired(1499));
        assert_eq!(timer.remaining_ms(1499), 1);
        assert!(timer.is_expired(1500));
        assert_eq!(timer.remaining_ms(2000), 0);
    }

    #[test]
    fn test_spit_timer_wraps() {
        let timer = SpitTimer::start(u32::MAX - 100, 0.0, 1000, 8000);
        assert!(!timer.is_expired(500));
        assert!(timer.is_expired(899));
    }

    #[test]
    fn test_drain_timer() {
        let timer = DrainTimer::start(0, 3000);
        assert!(!timer.is_finished(2999));
        assert_eq!(timer.remaining_ms(1000), 2000);
        assert!(timer.is_finished(3000));
    }
}
