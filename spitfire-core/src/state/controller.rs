//! Mode controller
//!
//! Evaluated once per control cycle. Turns resolved switch requests and
//! elapsed time into mode events, applies them through
//! [`Mode::transition`] and owns the spit and drain timers.
//!
//! Evaluation order per cycle, highest priority first:
//!
//! 1. latched fault
//! 2. fast switch held or released
//! 3. mist request edge
//! 4. spit trigger
//! 5. spit expiry
//! 6. drain on zero demand, drain expiry
//! 7. air flag

use heapless::Vec;

use super::events::ModeEvent;
use super::machine::Mode;
use super::timers::{spit_duration_ms, DrainTimer, SpitTimer};
use crate::config::PumpConfig;
use crate::input::{Edge, Requests};
use crate::safety::Fault;

/// Most transitions one cycle can apply (fast release, mist on, spit,
/// spit expiry/drain)
pub const MAX_TRANSITIONS: usize = 4;

/// Inputs to one mode evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeInputs {
    /// Resolved switch requests
    pub requests: Requests,
    /// Mist demand is at or above the minimum flow
    pub mist_flowing: bool,
    /// Spit potentiometer, normalized
    pub spit_percent: f32,
}

/// One applied mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub event: ModeEvent,
}

/// Transitions applied during one cycle
pub type Transitions = Vec<Transition, MAX_TRANSITIONS>;

/// Mode state machine with its timers
#[derive(Debug, Clone)]
pub struct ModeController {
    /// Motor mode, never `Air`
    mode: Mode,
    /// Mode to restore when Fast is released
    resume: Mode,
    air: bool,
    spit: Option<SpitTimer>,
    drain: Option<DrainTimer>,
    /// Mist has delivered flow since it was entered
    drain_armed: bool,
    spit_requested: bool,
    fault: Option<Fault>,

    spit_min_ms: u32,
    spit_max_ms: u32,
    drain_on_zero: bool,
    drain_duration_ms: u32,
    spit_on_mist_start: bool,
}

impl ModeController {
    /// Create a controller in Off
    pub fn new(config: &PumpConfig) -> Self {
        Self {
            mode: Mode::Off,
            resume: Mode::Off,
            air: false,
            spit: None,
            drain: None,
            drain_armed: false,
            spit_requested: false,
            fault: None,
            spit_min_ms: config.spit_min_time_ms,
            spit_max_ms: config.spit_max_time_ms,
            drain_on_zero: config.drain_on_zero,
            drain_duration_ms: config.drain_duration_ms,
            spit_on_mist_start: config.spit_on_mist_start,
        }
    }

    /// Get the active mode
    ///
    /// `Air` is reported when the motor is idle and the air flag is set.
    pub fn mode(&self) -> Mode {
        if self.mode == Mode::Off && self.air {
            Mode::Air
        } else {
            self.mode
        }
    }

    /// Check if the air-only flag is set
    pub fn air(&self) -> bool {
        self.air
    }

    /// Get the latched fault, if any
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Get the running spit timer
    pub fn spit_timer(&self) -> Option<&SpitTimer> {
        self.spit.as_ref()
    }

    /// Time left in the running spit, if any
    pub fn spit_remaining_ms(&self, now_ms: u32) -> Option<u32> {
        self.spit.map(|t| t.remaining_ms(now_ms))
    }

    /// Time left in the running drain, if any
    pub fn drain_remaining_ms(&self, now_ms: u32) -> Option<u32> {
        self.drain.map(|t| t.remaining_ms(now_ms))
    }

    /// Spit duration the spit potentiometer currently selects
    pub fn spit_preview_ms(&self, pct: f32) -> u32 {
        spit_duration_ms(pct, self.spit_min_ms, self.spit_max_ms)
    }

    /// Queue a spit trigger for the next evaluation
    ///
    /// Ignored unless the controller is in Mist at that point. A trigger
    /// that arrives while Fast is held is dropped.
    pub fn request_spit(&mut self) {
        self.spit_requested = true;
    }

    /// Latch a fault and force Off
    ///
    /// The fault is permanent: every later evaluation keeps the mode Off.
    pub fn force_off(&mut self, fault: Fault) -> Option<Transition> {
        self.fault = Some(fault);
        self.air = false;
        self.resume = Mode::Off;
        self.spit_requested = false;
        self.apply(ModeEvent::FaultDetected(fault))
    }

    /// Evaluate one control cycle
    pub fn update(&mut self, inputs: &ModeInputs, now_ms: u32) -> Transitions {
        let mut transitions = Transitions::new();
        if self.fault.is_some() {
            self.spit_requested = false;
            return transitions;
        }

        let requests = &inputs.requests;
        let mut spit_trigger = core::mem::take(&mut self.spit_requested);
        if self.spit_on_mist_start && requests.mist_edge == Some(Edge::Rising) {
            spit_trigger = true;
        }

        // Fast
        if requests.fast {
            if self.mode != Mode::Fast {
                self.resume = self.mode.resume_target();
                self.push(&mut transitions, ModeEvent::FastPressed);
            }
            // Mist edges while held only change where Fast returns to.
            // Spit triggers are dropped: Fast already cancels a spit.
            match requests.mist_edge {
                Some(Edge::Rising) => self.resume = self.resume.transition(ModeEvent::MistOn),
                Some(Edge::Falling) => self.resume = self.resume.transition(ModeEvent::MistOff),
                None => {}
            }
            self.air = requests.air;
            return transitions;
        }

        if self.mode == Mode::Fast {
            let from = self.mode;
            self.mode = self.resume;
            self.record(&mut transitions, from, ModeEvent::FastReleased);
        }

        // Mist, including an edge on the cycle Fast is released
        match requests.mist_edge {
            Some(Edge::Rising) => self.push(&mut transitions, ModeEvent::MistOn),
            Some(Edge::Falling) => self.push(&mut transitions, ModeEvent::MistOff),
            None => {}
        }

        // Spit
        if spit_trigger && self.mode == Mode::Mist {
            self.spit = Some(SpitTimer::start(
                now_ms,
                inputs.spit_percent,
                self.spit_min_ms,
                self.spit_max_ms,
            ));
            self.push(&mut transitions, ModeEvent::SpitTriggered);
        } else if let Some(timer) = self.spit {
            if self.mode == Mode::Spit && timer.is_expired(now_ms) {
                self.push(&mut transitions, ModeEvent::SpitExpired);
            }
        }

        // Drain
        if self.mode == Mode::Mist {
            if inputs.mist_flowing {
                self.drain_armed = true;
            } else if self.drain_on_zero && self.drain_armed {
                self.drain = Some(DrainTimer::start(now_ms, self.drain_duration_ms));
                self.push(&mut transitions, ModeEvent::DemandZero);
            }
        } else if let Some(timer) = self.drain {
            if self.mode == Mode::Drain && timer.is_finished(now_ms) {
                self.push(&mut transitions, ModeEvent::DrainFinished);
            }
        }

        self.air = requests.air;
        transitions
    }

    /// Apply an event and record the transition if the mode changed
    fn push(&mut self, transitions: &mut Transitions, event: ModeEvent) {
        if let Some(transition) = self.apply(event) {
            // Capacity covers the longest chain one cycle can produce
            let _ = transitions.push(transition);
        }
    }

    fn record(&mut self, transitions: &mut Transitions, from: Mode, event: ModeEvent) {
        self.enter(from);
        if from != self.mode {
            let _ = transitions.push(Transition {
                from,
                to: self.mode,
                event,
            });
        }
    }

    fn apply(&mut self, event: ModeEvent) -> Option<Transition> {
        let from = self.mode;
        self.mode = from.transition(event);
        self.enter(from);

        (from != self.mode).then_some(Transition {
            from,
            to: self.mode,
            event,
        })
    }

    /// Drop timers and flags that do not survive leaving `from`
    fn enter(&mut self, from: Mode) {
        if from == self.mode {
            return;
        }
        if self.mode != Mode::Spit {
            self.spit = None;
        }
        if self.mode != Mode::Drain {
            self.drain = None;
        }
        match (from, self.mode) {
            // Restored from Fast or back from Spit: keep the drain arming
            (Mode::Fast | Mode::Spit, Mode::Mist) => {}
            (_, Mode::Mist) | (_, Mode::Off) | (_, Mode::Drain) => self.drain_armed = false,
            _ => {}
        }
    }
}
