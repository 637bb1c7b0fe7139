//! Test doubles for the HAL traits
//!
//! Input levels and ADC readings live in `Cell`s owned by the test so they
//! can be changed while the loop owns the mock. Recorders use `heapless` and
//! silently drop entries past their capacity.

use core::cell::Cell;
use core::ops::Range;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tally_hal::{AdcConverter, DisplayCommand, DisplayError, InputPin, OutputPin, PixelDisplay};

use crate::field::FieldText;
use crate::surface::TextPlacement;

/// Input line reading a test-controlled level
pub struct MockLine<'a>(pub &'a Cell<bool>);

impl InputPin for MockLine<'_> {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

/// Output that counts writes
#[derive(Debug, Default)]
pub struct MockLed {
    high: bool,
    pub writes: u32,
}

impl OutputPin for MockLed {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Converter operations in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcStep {
    Start,
    Convert,
    Read,
}

/// Converter that finishes after a fixed number of not-done polls
pub struct MockAdc<'a> {
    reading: &'a Cell<u16>,
    polls_until_done: Option<u32>,
    remaining: Cell<u32>,
    pub steps: Vec<AdcStep, 8>,
}

impl<'a> MockAdc<'a> {
    pub fn new(reading: &'a Cell<u16>, polls_until_done: u32) -> Self {
        Self {
            reading,
            polls_until_done: Some(polls_until_done),
            remaining: Cell::new(0),
            steps: Vec::new(),
        }
    }

    pub fn never_done(reading: &'a Cell<u16>) -> Self {
        Self {
            reading,
            polls_until_done: None,
            remaining: Cell::new(0),
            steps: Vec::new(),
        }
    }
}

impl AdcConverter for MockAdc<'_> {
    fn start_sample(&mut self) {
        let _ = self.steps.push(AdcStep::Start);
    }

    fn stop_sample_begin_convert(&mut self) {
        let _ = self.steps.push(AdcStep::Convert);
        self.remaining.set(self.polls_until_done.unwrap_or(0));
    }

    fn is_conversion_done(&self) -> bool {
        if self.polls_until_done.is_none() {
            return false;
        }
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }

    fn read_conversion_result(&mut self) -> u16 {
        let _ = self.steps.push(AdcStep::Read);
        self.reading.get()
    }
}

/// Delay that only adds up requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// One `draw_text` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCall {
    pub placement: TextPlacement,
    pub text: FieldText,
    pub color: Rgb565,
}

/// 96x96 display recording what was drawn
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub texts: Vec<TextCall, 32>,
    pub commands: Vec<DisplayCommand, 8>,
    pub windows: u32,
    pub pixels: u32,
    pub last_pixel: Option<Rgb565>,
    /// Fail every operation with `Communication`
    pub fail: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_log(&mut self) {
        self.texts.clear();
        self.commands.clear();
        self.windows = 0;
        self.pixels = 0;
        self.last_pixel = None;
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }
}

impl PixelDisplay for MockDisplay {
    fn size(&self) -> (u8, u8) {
        (96, 96)
    }

    fn set_address_bounds(
        &mut self,
        _columns: Range<u8>,
        _rows: Range<u8>,
    ) -> Result<(), DisplayError> {
        self.check()?;
        self.windows += 1;
        Ok(())
    }

    fn send_pixel_color(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.check()?;
        self.pixels += 1;
        self.last_pixel = Some(color);
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: u8,
        y: u8,
        scale_x: u8,
        scale_y: u8,
        text: &str,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.check()?;
        let mut recorded = FieldText::new();
        let _ = recorded.push_str(text);
        let _ = self.texts.push(TextCall {
            placement: TextPlacement::new(x, y, scale_x, scale_y),
            text: recorded,
            color,
        });
        Ok(())
    }

    fn send_command(&mut self, command: DisplayCommand) -> Result<(), DisplayError> {
        self.check()?;
        let _ = self.commands.push(command);
        Ok(())
    }
}
