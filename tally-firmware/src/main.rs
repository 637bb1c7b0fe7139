//! Tally - Counter and Potentiometer Display Firmware
//!
//! Main firmware binary for RP2040 boards with two buttons, a potentiometer
//! and a 96x96 SSD1351 OLED. S1 counts presses, S2 flips the panel between
//! normal and inverse, and the potentiometer reading is shown live.
//!
//! The control loop is a single blocking poll loop; the executor only hosts
//! it.

#![no_std]
#![no_main]

mod adc;
mod board;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use tally_core::{
    AnalogSampler, Button, ControlLoop, LoopConfig, SamplerConfig, StepReport, Surface,
};

/// Pause before retrying a failed startup render
const START_RETRY_MS: u64 = 500;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tally firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board::Board {
        increment,
        mode,
        increment_led,
        mode_led,
        potentiometer,
        mut panel,
        mut panel_reset,
    } = board::initialize_hardware(p);

    // Initialize OLED panel
    if let Err(e) = panel.init(&mut panel_reset, &mut Delay) {
        error!("Failed to initialize display: {}", e);
    } else {
        info!("OLED initialized");
    }

    let sampler_config = SamplerConfig::default();
    let sampler = AnalogSampler::new(potentiometer, Delay, sampler_config);

    let mut control = ControlLoop::new(
        Button::new(increment, increment_led),
        Button::new(mode, mode_led),
        sampler,
        Surface::new(panel),
        LoopConfig::default(),
    );

    while let Err(e) = control.start() {
        error!("Startup render failed: {}", e);
        Timer::after(Duration::from_millis(START_RETRY_MS)).await;
    }
    info!("Display ready, entering control loop");

    loop {
        match control.step() {
            Ok(report) => log_report(&report),
            Err(e) => warn!("Control loop iteration failed: {}", e),
        }
    }
}

/// Log the interesting parts of an iteration
fn log_report(report: &StepReport) {
    if let Some(count) = report.counter {
        info!("S1 pressed, counter = {}", count);
    }
    if let Some(mode) = report.mode {
        info!("S2 pressed, mode = {}", mode);
    }
    if report.reading_applied {
        debug!("Potentiometer = {}", report.reading);
    }
}
