//! Step timer task
//!
//! Runs on the high-priority interrupt executor. Each wakeup is one timer
//! callback: the pulse generator reads the published command, emits at
//! most one step and returns the period until the next wakeup. A new
//! interval only affects the period after the current one.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Instant, Timer};

use spitfire_core::scheduler::{PulseGenerator, StepDeadline};
use spitfire_drivers::stepper::StepDirPins;

use crate::channels::FLOW_COMMAND;

/// STEP/DIR pins as wired on the board
pub type PumpStepPins = StepDirPins<Output<'static>, Output<'static>, Delay>;

/// Step timer task
///
/// Never returns; once spawned the heartbeat must keep running or the
/// control task declares the timer lost.
#[embassy_executor::task]
pub async fn stepper_task(mut pins: PumpStepPins, idle_poll_period_us: u32) {
    info!("Stepper task started");

    let mut generator = PulseGenerator::new(idle_poll_period_us);
    let mut deadline = StepDeadline::new(Instant::now().as_micros());

    loop {
        let period_us = generator.on_timer(&FLOW_COMMAND, &mut pins);

        if let Some(late_us) = deadline.advance(period_us, Instant::now().as_micros()) {
            // Missed callbacks are not replayed as a burst
            warn!(
                "Step timer overrun by {} us at {} us period ({} total)",
                late_us,
                period_us,
                deadline.overruns()
            );
        }

        Timer::at(Instant::from_micros(deadline.next_us())).await;
    }
}
