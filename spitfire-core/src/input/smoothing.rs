//! Potentiometer smoothing
//!
//! First-order exponential moving average over raw ADC counts. The filter
//! starts at zero, so a knob that is already turned up at power-on ramps
//! in rather than jumping.

/// One potentiometer sample after filtering
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PotentiometerReading {
    /// Raw ADC counts as read
    pub raw: u16,
    /// Filtered value in ADC counts
    pub smoothed: f32,
    /// Filtered value normalized to full scale, clamped to [0, 1]
    pub percent: f32,
}

impl PotentiometerReading {
    /// Reading with everything at zero
    pub const fn zero() -> Self {
        Self {
            raw: 0,
            smoothed: 0.0,
            percent: 0.0,
        }
    }
}

/// EMA filter for one potentiometer
#[derive(Debug, Clone)]
pub struct Potentiometer {
    alpha: f32,
    full_scale: f32,
    smoothed: f32,
    last: PotentiometerReading,
}

impl Potentiometer {
    /// Create a filter
    ///
    /// # Arguments
    /// - `alpha`: EMA factor, `0 < alpha <= 1` (checked by config validation)
    /// - `full_scale`: ADC reading that corresponds to 100%
    pub fn new(alpha: f32, full_scale: u16) -> Self {
        Self {
            alpha,
            full_scale: full_scale.max(1) as f32,
            smoothed: 0.0,
            last: PotentiometerReading::zero(),
        }
    }

    /// Feed one raw sample and return the updated reading
    pub fn sample(&mut self, raw: u16) -> PotentiometerReading {
        // Readings above full scale are treated as full scale
        let target = (raw as f32).min(self.full_scale);
        self.smoothed += self.alpha * (target - self.smoothed);

        self.last = PotentiometerReading {
            raw,
            smoothed: self.smoothed,
            percent: (self.smoothed / self.full_scale).clamp(0.0, 1.0),
        };
        self.last
    }

    /// Get the last reading
    pub fn reading(&self) -> PotentiometerReading {
        self.last
    }

    /// Get the last normalized value
    pub fn percent(&self) -> f32 {
        self.last.percent
    }
}
