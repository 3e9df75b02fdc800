//! Switch disciplines
//!
//! Toggle switches and push buttons produce the same thing for the mode
//! controller: a logical request that is either active or not, plus the
//! edges of that request. The discipline is chosen at runtime from the
//! configuration.

use super::debounce::{Debouncer, Edge};
use crate::config::SwitchMode;

/// Debounced state of one switch after one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchState {
    /// Contact level as sampled (true = closed)
    pub raw: bool,
    /// Contact level after debouncing
    pub debounced: bool,
    /// Debounced contact closed on this sample
    pub rising: bool,
    /// Debounced contact opened on this sample
    pub falling: bool,
    /// Latched toggle bit (momentary inputs only, always false otherwise)
    pub toggled: bool,
    /// Logical request
    pub active: bool,
    /// Logical request turned on on this sample
    pub activated: bool,
    /// Logical request turned off on this sample
    pub deactivated: bool,
}

impl SwitchState {
    /// Logical request edge, if any
    pub fn request_edge(&self) -> Option<Edge> {
        if self.activated {
            Some(Edge::Rising)
        } else if self.deactivated {
            Some(Edge::Falling)
        } else {
            None
        }
    }
}

/// Strategy for turning contact samples into a logical request
pub trait SwitchReader {
    /// Feed one raw contact sample
    fn update(&mut self, raw: bool, now_ms: u32) -> SwitchState;

    /// Get the current logical request
    fn is_active(&self) -> bool;
}

/// Toggle switch: the debounced level is the request
#[derive(Debug, Clone)]
pub struct MaintainedSwitch {
    debouncer: Debouncer,
}

impl MaintainedSwitch {
    /// Create a maintained-contact switch, open at power-on
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debouncer: Debouncer::new(false, debounce_ms),
        }
    }
}

impl SwitchReader for MaintainedSwitch {
    fn update(&mut self, raw: bool, now_ms: u32) -> SwitchState {
        let edge = self.debouncer.update(raw, now_ms);
        let rising = edge == Some(Edge::Rising);
        let falling = edge == Some(Edge::Falling);

        SwitchState {
            raw,
            debounced: self.debouncer.level(),
            rising,
            falling,
            toggled: false,
            active: self.debouncer.level(),
            activated: rising,
            deactivated: falling,
        }
    }

    fn is_active(&self) -> bool {
        self.debouncer.level()
    }
}

/// Push button: each validated press flips a latched request
#[derive(Debug, Clone)]
pub struct MomentarySwitch {
    debouncer: Debouncer,
    latched: bool,
}

impl MomentarySwitch {
    /// Create a momentary-contact switch, released and unlatched at power-on
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debouncer: Debouncer::new(false, debounce_ms),
            latched: false,
        }
    }
}

impl SwitchReader for MomentarySwitch {
    fn update(&mut self, raw: bool, now_ms: u32) -> SwitchState {
        let edge = self.debouncer.update(raw, now_ms);
        let rising = edge == Some(Edge::Rising);
        let falling = edge == Some(Edge::Falling);

        if rising {
            self.latched = !self.latched;
        }

        SwitchState {
            raw,
            debounced: self.debouncer.level(),
            rising,
            falling,
            toggled: self.latched,
            active: self.latched,
            activated: rising && self.latched,
            deactivated: rising && !self.latched,
        }
    }

    fn is_active(&self) -> bool {
        self.latched
    }
}

/// Switch whose discipline is picked from the configuration
#[derive(Debug, Clone)]
pub enum AnySwitch {
    /// Toggle switch
    Maintained(MaintainedSwitch),
    /// Push button
    Momentary(MomentarySwitch),
}

impl AnySwitch {
    /// Create a switch for the configured discipline
    pub fn new(mode: SwitchMode, debounce_ms: u32) -> Self {
        match mode {
            SwitchMode::Maintained => AnySwitch::Maintained(MaintainedSwitch::new(debounce_ms)),
            SwitchMode::Momentary => AnySwitch::Momentary(MomentarySwitch::new(debounce_ms)),
        }
    }
}

impl SwitchReader for AnySwitch {
    fn update(&mut self, raw: bool, now_ms: u32) -> SwitchState {
        match self {
            AnySwitch::Maintained(s) => s.update(raw, now_ms),
            AnySwitch::Momentary(s) => s.update(raw, now_ms),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            AnySwitch::Maintained(s) => s.is_active(),
            AnySwitch::Momentary(s) => s.is_active(),
        }
    }
}
