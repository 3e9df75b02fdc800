//! Flow command and its lock-free publication
//!
//! The main loop publishes one [`FlowCommand`] per cycle; the step timer
//! reads it on every callback. The command is packed into a single 32-bit
//! word so it is written and read whole:
//!
//! | bits  | field                          |
//! |-------|--------------------------------|
//! | 0-29  | interval in microseconds       |
//! | 30    | direction (1 = reverse)        |
//! | 31    | enable                         |
//!
//! Only atomic loads and stores are used, which Cortex-M0+ supports.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::traits::Direction;

/// Largest interval the packed command can carry
pub const MAX_INTERVAL_US: u32 = (1 << 30) - 1;

const INTERVAL_MASK: u32 = MAX_INTERVAL_US;
const REVERSE_BIT: u32 = 1 << 30;
const ENABLE_BIT: u32 = 1 << 31;

/// Step timing requested from the step timer
///
/// The motor is enabled exactly when an interval is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowCommand {
    /// Step period, `None` when the motor is disabled
    pub interval_us: Option<u32>,
    pub direction: Direction,
}

impl FlowCommand {
    /// Create a disabled command
    pub const fn disabled() -> Self {
        Self {
            interval_us: None,
            direction: Direction::Forward,
        }
    }

    /// Create a running command
    pub const fn running(interval_us: u32, direction: Direction) -> Self {
        Self {
            interval_us: Some(interval_us),
            direction,
        }
    }

    /// Check if the motor should be enabled
    pub fn enabled(&self) -> bool {
        self.interval_us.is_some()
    }

    /// Pack into the shared word
    ///
    /// Intervals above [`MAX_INTERVAL_US`] saturate.
    pub fn pack(&self) -> u32 {
        let mut word = match self.interval_us {
            Some(interval) => ENABLE_BIT | interval.min(MAX_INTERVAL_US),
            None => 0,
        };
        if self.direction == Direction::Reverse {
            word |= REVERSE_BIT;
        }
        word
    }

    /// Unpack from the shared word
    pub fn unpack(word: u32) -> Self {
        let direction = if word & REVERSE_BIT != 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let interval_us = (word & ENABLE_BIT != 0).then_some(word & INTERVAL_MASK);
        Self {
            interval_us,
            direction,
        }
    }
}

/// State shared between the main loop and the step timer
///
/// Meant to live in a `static`. The main loop is the only writer of the
/// command; the step timer is the only writer of the tick counter.
#[derive(Debug)]
pub struct SharedFlowCommand {
    word: AtomicU32,
    ticks: AtomicU32,
}

impl Default for SharedFlowCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFlowCommand {
    /// Create with a disabled command
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
            ticks: AtomicU32::new(0),
        }
    }

    /// Publish a command (main loop)
    pub fn store(&self, command: FlowCommand) {
        self.word.store(command.pack(), Ordering::Release);
    }

    /// Read the current command (step timer)
    pub fn load(&self) -> FlowCommand {
        FlowCommand::unpack(self.word.load(Ordering::Acquire))
    }

    /// Count one timer callback (step timer)
    pub fn tick(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Relaxed);
    }

    /// Number of timer callbacks so far, wrapping
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }
}
