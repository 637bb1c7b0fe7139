//! RP2040 ADC adapter
//!
//! The RP2040 converter has no separate sample/convert phases under
//! software control; a blocking read does both. The read is issued when
//! conversion is requested and its result is held until the next sample.
//! A failed read leaves the conversion "not done", which the sampler
//! turns into a timeout.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use tally_hal::AdcConverter;

/// Potentiometer channel
pub struct RpAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
    result: Option<u16>,
}

impl RpAdc {
    /// Bind the converter to a channel
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self {
            adc,
            channel,
            result: None,
        }
    }
}

impl AdcConverter for RpAdc {
    fn start_sample(&mut self) {
        self.result = None;
    }

    fn stop_sample_begin_convert(&mut self) {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(value) => self.result = Some(value),
            Err(e) => warn!("ADC read failed: {}", Debug2Format(&e)),
        }
    }

    fn is_conversion_done(&self) -> bool {
        self.result.is_some()
    }

    fn read_conversion_result(&mut self) -> u16 {
        self.result.unwrap_or(0)
    }
}
