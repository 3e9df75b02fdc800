//! Time-based switch debouncing
//!
//! A level change is accepted only after the input has held the new level
//! continuously for the hold time. Anything shorter is bounce and is
//! discarded without reporting an edge.

/// A validated level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Stable level went from inactive to active
    Rising,
    /// Stable level went from active to inactive
    Falling,
}

/// Hold-time debouncer for one digital input
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Accepted level
    stable: bool,
    /// Level waiting to be accepted, if it differs from `stable`
    candidate: Option<Candidate>,
    hold_ms: u32,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    level: bool,
    since_ms: u32,
}

impl Debouncer {
    /// Create a debouncer
    ///
    /// # Arguments
    /// - `initial`: stable level assumed at power-on
    /// - `hold_ms`: time a new level must persist before it is accepted
    pub fn new(initial: bool, hold_ms: u32) -> Self {
        Self {
            stable: initial,
            candidate: None,
            hold_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// `now_ms` is a monotonic millisecond counter; wrap-around is handled.
    /// Returns the edge when a new level has just been accepted.
    pub fn update(&mut self, raw: bool, now_ms: u32) -> Option<Edge> {
        if raw == self.stable {
            // Back to the accepted level before the hold elapsed: bounce
            self.candidate = None;
            return None;
        }

        let since_ms = match self.candidate {
            Some(c) if c.level == raw => c.since_ms,
            _ => {
                self.candidate = Some(Candidate {
                    level: raw,
                    since_ms: now_ms,
                });
                now_ms
            }
        };

        if now_ms.wrapping_sub(since_ms) >= self.hold_ms {
            self.stable = raw;
            self.candidate = None;
            Some(if raw { Edge::Rising } else { Edge::Falling })
        } else {
            None
        }
    }

    /// Get the accepted level
    pub fn level(&self) -> bool {
        self.stable
    }

    /// Check if a level change is waiting out the hold time
    pub fn is_settling(&self) -> bool {
        self.candidate.is_some()
    }
}
