//! Main control loop
//!
//! A single busy-polling loop. Every iteration, in order:
//!
//! 1. poll the increment button; a press bumps the counter and updates
//!    the counter field
//! 2. poll the mode button; a press toggles the display mode
//! 3. sample the potentiometer; a reading that moved more than the
//!    hysteresis threshold from the last accepted one updates the
//!    potentiometer field and becomes the new baseline
//!
//! All mutable state lives in [`DisplayState`], owned by the loop.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use tally_hal::{AdcConverter, InputPin, OutputPin, PixelDisplay};

use crate::button::Button;
use crate::config::LoopConfig;
use crate::error::LoopError;
use crate::field::{update_field, Field};
use crate::mode::{DisplayMode, ModeToggle};
use crate::sampler::AnalogSampler;
use crate::surface::Surface;

/// Whether a reading counts as real movement relative to `baseline`
///
/// Strictly greater than `threshold`. Before the first accepted movement the
/// baseline sits one count below zero, so the first reading has to reach
/// `threshold` itself to be shown.
pub fn exceeds_hysteresis(baseline: Option<u16>, reading: u16, threshold: u16) -> bool {
    match baseline {
        Some(previous) => previous.abs_diff(reading) > threshold,
        None => u32::from(reading) + 1 > u32::from(threshold),
    }
}

/// Everything the loop remembers between iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Number of presses on the increment button
    pub count: u16,
    /// Counter field
    pub counter: Field,
    /// Potentiometer field, tracking the latest sample
    pub potentiometer: Field,
    /// Display mode
    pub mode: ModeToggle,
    /// Last reading accepted as movement, `None` before the first
    pub baseline: Option<u16>,
}

impl DisplayState {
    /// Fresh state: counter and reading at zero, nothing drawn
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            count: 0,
            counter: Field::new(config.counter, 0),
            potentiometer: Field::new(config.potentiometer, 0),
            mode: ModeToggle::new(),
            baseline: None,
        }
    }
}

/// What happened during one iteration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// New counter value, if the increment button was pressed
    pub counter: Option<u16>,
    /// New mode, if the mode button was pressed
    pub mode: Option<DisplayMode>,
    /// Potentiometer reading taken this iteration
    pub reading: u16,
    /// Whether the reading passed the hysteresis check
    pub reading_applied: bool,
}

/// The firmware's control loop
pub struct ControlLoop<P, L, A, T, D> {
    increment: Button<P, L>,
    mode_button: Button<P, L>,
    sampler: AnalogSampler<A, T>,
    surface: Surface<D>,
    state: DisplayState,
    config: LoopConfig,
}

impl<P, L, A, T, D> ControlLoop<P, L, A, T, D>
where
    P: InputPin,
    L: OutputPin,
    A: AdcConverter,
    T: DelayNs,
    D: PixelDisplay,
{
    /// Assemble the loop from initialized hardware
    pub fn new(
        increment: Button<P, L>,
        mode_button: Button<P, L>,
        sampler: AnalogSampler<A, T>,
        surface: Surface<D>,
        config: LoopConfig,
    ) -> Self {
        Self {
            increment,
            mode_button,
            sampler,
            surface,
            state: DisplayState::new(&config),
            config,
        }
    }

    /// Paint the background and both fields once
    pub fn start(&mut self) -> Result<(), LoopError> {
        self.surface.set_background(self.config.background)?;

        let state = &mut self.state;
        update_field(&mut self.surface, &mut state.counter, state.count)?;
        let reading = state.potentiometer.current();
        update_field(&mut self.surface, &mut state.potentiometer, reading)?;

        Ok(())
    }

    /// Run one iteration
    pub fn step(&mut self) -> Result<StepReport, LoopError> {
        let mut report = StepReport::default();
        let state = &mut self.state;

        if self.increment.poll().is_some() {
            state.count = state.count.wrapping_add(1);
            update_field(&mut self.surface, &mut state.counter, state.count)?;
            report.counter = Some(state.count);

            #[cfg(feature = "defmt")]
            defmt::debug!("Counter -> {}", state.count);
        }

        if self.mode_button.poll().is_some() {
            let mode = state.mode.toggle(
                &mut self.surface,
                &mut [&mut state.counter, &mut state.potentiometer],
            )?;
            report.mode = Some(mode);
        }

        let reading = self.sampler.sample()?;
        state.potentiometer.set_current(reading);
        report.reading = reading;

        if exceeds_hysteresis(state.baseline, reading, self.config.hysteresis) {
            update_field(&mut self.surface, &mut state.potentiometer, reading)?;
            state.baseline = Some(reading);
            report.reading_applied = true;

            #[cfg(feature = "defmt")]
            defmt::trace!("Potentiometer -> {}", reading);
        }

        Ok(report)
    }

    /// Poll forever; only returns on error
    pub fn run(&mut self) -> Result<Infallible, LoopError> {
        loop {
            self.step()?;
        }
    }

    /// Loop state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Drawing surface
    pub fn surface(&self) -> &Surface<D> {
        &self.surface
    }

    /// Mutable drawing surface
    pub fn surface_mut(&mut self) -> &mut Surface<D> {
        &mut self.surface
    }

    /// Increment button
    pub fn increment_button(&self) -> &Button<P, L> {
        &self.increment
    }

    /// Mode button
    pub fn mode_button(&self) -> &Button<P, L> {
        &self.mode_button
    }
}
