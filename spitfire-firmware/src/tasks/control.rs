//! Control loop task
//!
//! Runs one [`Controller::cycle`] per tick:
//! - Reads both potentiometers through the ADC
//! - Reads the fast, mist and air switches
//! - Runs the controller and logs what changed

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker};

use spitfire_core::input::RawInputs;
use spitfire_core::Controller;
use spitfire_drivers::input::SwitchBank;
use spitfire_drivers::stepper::EnablePin;
use spitfire_drivers::valves::GpioValves;

use crate::display::DefmtDisplay;

/// Control loop period in milliseconds
pub const CONTROL_PERIOD_MS: u64 = 1;

/// Controller with the board's concrete outputs
pub type PumpController = Controller<
    'static,
    EnablePin<Output<'static>>,
    GpioValves<Output<'static>, Output<'static>, Output<'static>>,
    DefmtDisplay,
>;

/// Inputs read by the control task
pub struct ControlHardware {
    pub adc: Adc<'static, Async>,
    pub mist_pot: Channel<'static>,
    pub spit_pot: Channel<'static>,
    pub switches: SwitchBank<Input<'static>, Input<'static>, Input<'static>>,
}

/// Control loop task
#[embassy_executor::task]
pub async fn control_task(mut controller: PumpController, mut hw: ControlHardware) {
    info!(
        "Control task started, tick timeout {} ms",
        controller.config().tick_timeout_ms
    );

    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_PERIOD_MS));

    // Last good conversions, reused if the ADC reports an error
    let mut mist_raw: u16 = 0;
    let mut spit_raw: u16 = 0;

    loop {
        ticker.next().await;

        match hw.adc.read(&mut hw.mist_pot).await {
            Ok(v) => mist_raw = v,
            Err(e) => warn!("Mist pot read error: {:?}", e),
        }
        match hw.adc.read(&mut hw.spit_pot).await {
            Ok(v) => spit_raw = v,
            Err(e) => warn!("Spit pot read error: {:?}", e),
        }

        let raw: RawInputs = hw.switches.read(mist_raw, spit_raw);
        let now_ms = Instant::now().as_millis() as u32;
        let report = controller.cycle(&raw, now_ms);

        for t in report.transitions.iter() {
            debug!("Mode {:?} -> {:?} on {:?}", t.from, t.to, t.event);
        }

        if report.new_fault {
            if let Some(fault) = report.fault {
                error!("Pump fault: {:?}, motor disabled until restart", fault);
            }
        }

        if report.clamped {
            warn!(
                "Step interval clamped to {} us ({} total)",
                report.command.interval_us,
                controller.clamp_count()
            );
        }

        if let Some(Err(e)) = report.display {
            warn!("Display render failed: {:?}", e);
        }

        trace!(
            "mode={:?} cmd={:?} mist={} spit={}",
            report.mode,
            report.command,
            report.inputs.mist_pot.percent,
            report.inputs.spit_pot.percent
        );
    }
}
