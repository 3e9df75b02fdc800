//! Status output over defmt
//!
//! Boards without a panel still get the status line over RTT.
//! Only changed lines are logged so a 10 Hz refresh does not flood RTT.

use defmt::*;
use heapless::String;

use spitfire_core::display::{DisplaySnapshot, STATUS_LINE_LEN};
use spitfire_core::traits::{DisplayAdapter, DisplayError};

/// Display adapter that logs the status line
#[derive(Default)]
pub struct DefmtDisplay {
    last: String<STATUS_LINE_LEN>,
}

impl DefmtDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayAdapter for DefmtDisplay {
    fn render(&mut self, snapshot: &DisplaySnapshot) -> Result<(), DisplayError> {
        let line = snapshot.status_line()?;
        if line != self.last {
            info!("[status] {}", line.as_str());
            self.last = line;
        }
        Ok(())
    }
}
