//! Spitfire - MQL Pump Firmware
//!
//! Main firmware binary for RP2040-based minimum quantity lubrication
//! pumps. A stepper meters coolant mist continuously and delivers timed
//! "spit" bursts, with fast purge, air-only and drain modes.
//!
//! Two execution contexts:
//! - Interrupt executor (SWI_IRQ_1): the step timer, never blocked by
//!   anything else
//! - Thread executor: the control loop, input sampling and status output

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use spitfire_core::config::PumpConfig;
use spitfire_core::{ControlOutputs, Controller};
use spitfire_drivers::input::SwitchBank;
use spitfire_drivers::stepper::{EnablePin, StepDirPins, DEFAULT_PULSE_WIDTH_NS};
use spitfire_drivers::valves::GpioValves;
use spitfire_drivers::ActiveLevel;

use crate::channels::FLOW_COMMAND;
use crate::display::DefmtDisplay;

mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Executor for the step timer task
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Spitfire firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = PumpConfig::default();

    // Driver enable comes up first so the motor is held off whatever
    // happens next. Pin assignments follow the SKR Pico X driver
    // (STEP=GPIO11, DIR=GPIO10, ENABLE=GPIO12, enable active low).
    let enable = EnablePin::new(Output::new(p.PIN_12, Level::High), ActiveLevel::Low);

    if let Err(e) = config.validate() {
        error!("Invalid pump configuration: {}", e);
        error!("Refusing to arm the motor");
        loop {
            Timer::after_secs(60).await;
        }
    }

    info!(
        "Flow: {}-{} ml/h, min interval {} us, curve {:?}",
        config.min_ml_per_hour,
        config.max_ml_per_hour,
        config.min_flow_interval_us,
        config.control_curve
    );

    let step_pins: tasks::PumpStepPins = StepDirPins::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Delay,
        DEFAULT_PULSE_WIDTH_NS,
        false,
    );

    // Valves on the heater/fan MOSFETs (HE0=GPIO23, HB=GPIO21),
    // spit indicator on FAN1 (GPIO17)
    let valves = GpioValves::new(
        Output::new(p.PIN_23, Level::Low),
        Output::new(p.PIN_21, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        ActiveLevel::High,
    );

    // Switches on the endstop inputs, contacts to ground
    // (X-STOP=GPIO4 fast, Y-STOP=GPIO3 mist, Z-STOP=GPIO25 air)
    let switches = SwitchBank::new(
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_25, Pull::Up),
        ActiveLevel::Low,
    );

    // Potentiometers on the thermistor inputs (THB=GPIO26 mist, TH0=GPIO27 spit)
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let mist_pot = Channel::new_pin(p.PIN_26, Pull::None);
    let spit_pot = Channel::new_pin(p.PIN_27, Pull::None);

    info!("GPIO and ADC initialized");

    let outputs = ControlOutputs {
        enable,
        valves,
        display: DefmtDisplay::new(),
    };

    let controller: tasks::PumpController = match Controller::new(config, &FLOW_COMMAND, outputs) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Controller rejected configuration: {}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    let hw = tasks::ControlHardware {
        adc,
        mist_pot,
        spit_pot,
        switches,
    };

    // Step timer runs above thread mode so the control loop and status
    // output can never delay a pulse
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::stepper_task(step_pins, config.idle_poll_period_us))
        .unwrap();
    spawner.spawn(tasks::control_task(controller, hw)).unwrap();

    info!("All tasks spawned, pump running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat, {} step timer ticks", FLOW_COMMAND.ticks());
    }
}
