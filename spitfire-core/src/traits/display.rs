//! Display adapter trait
//!
//! The pump core does not draw anything itself. Whatever panel is
//! attached (OLED, seven-segment, character LCD) receives a throttled
//! [`DisplaySnapshot`] and renders it however it likes.

use crate::display::DisplaySnapshot;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed (I2C NACK, timeout)
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Rendered text did not fit the panel
    BufferOverflow,
}

/// Trait for status displays
///
/// Called at most once per display refresh period, from the control loop
/// only. Implementations may block on bus I/O; the step timer is never
/// affected by how long this takes.
pub trait DisplayAdapter {
    /// Render the current pump state
    fn render(&mut self, snapshot: &DisplaySnapshot) -> Result<(), DisplayError>;
}

/// Display adapter for pumps without a panel
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplay;

impl DisplayAdapter for NoDisplay {
    fn render(&mut self, _snapshot: &DisplaySnapshot) -> Result<(), DisplayError> {
        Ok(())
    }
}
