//! Blocking potentiometer sampling
//!
//! One call to [`AnalogSampler::sample`] runs a full sample-and-hold cycle:
//! acquire, convert, wait for completion, read. The wait is bounded by
//! [`SamplerConfig::max_polls`]; a converter that never finishes becomes a
//! [`SampleError::ConversionTimeout`] instead of a hung loop.

use embedded_hal::delay::DelayNs;
use tally_hal::{AdcConverter, ADC_FULL_SCALE};

use crate::config::SamplerConfig;
use crate::error::SampleError;

/// Analog sampler over a single converter channel
pub struct AnalogSampler<A, T> {
    adc: A,
    delay: T,
    config: SamplerConfig,
}

impl<A: AdcConverter, T: DelayNs> AnalogSampler<A, T> {
    /// Create a new sampler
    pub fn new(adc: A, delay: T, config: SamplerConfig) -> Self {
        Self { adc, delay, config }
    }

    /// Take one reading in `0..=4095`
    pub fn sample(&mut self) -> Result<u16, SampleError> {
        self.adc.start_sample();
        self.delay.delay_us(self.config.acquisition_us);
        self.adc.stop_sample_begin_convert();

        self.wait_for_conversion()?;

        Ok(self.adc.read_conversion_result().min(ADC_FULL_SCALE))
    }

    fn wait_for_conversion(&mut self) -> Result<(), SampleError> {
        let mut polls: u32 = 0;

        while !self.adc.is_conversion_done() {
            if let Some(max) = self.config.max_polls {
                if polls >= max {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("ADC conversion not done after {} polls", polls);
                    return Err(SampleError::ConversionTimeout);
                }
            }
            self.delay.delay_us(self.config.poll_interval_us);
            polls = polls.saturating_add(1);
        }

        Ok(())
    }

    /// Get access to the underlying converter
    pub fn adc(&self) -> &A {
        &self.adc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{AdcStep, MockAdc, MockDelay};
    use core::cell::Cell;

    fn config(max_polls: Option<u32>) -> SamplerConfig {
        SamplerConfig {
            acquisition_us: 100,
            poll_interval_us: 2,
            max_polls,
        }
    }

    #[test]
    fn test_sample_sequence() {
        let reading = Cell::new(1234);
        let mut sampler = AnalogSampler::new(
            MockAdc::new(&reading, 3),
            MockDelay::default(),
            config(Some(10)),
        );

        assert_eq!(sampler.sample(), Ok(1234));

        let steps = sampler.adc().steps.as_slice();
        assert_eq!(
            steps,
            &[AdcStep::Start, AdcStep::Convert, AdcStep::Read]
        );
        // Acquisition plus three waits before completion
        assert_eq!(sampler.delay.total_us(), 100 + 3 * 2);
    }

    #[test]
    fn test_sample_immediately_done() {
        let reading = Cell::new(0);
        let mut sampler =
            AnalogSampler::new(MockAdc::new(&reading, 0), MockDelay::default(), config(Some(0)));

        assert_eq!(sampler.sample(), Ok(0));
        assert_eq!(sampler.delay.total_us(), 100);
    }

    #[test]
    fn test_sample_clamps_to_12_bits() {
        let reading = Cell::new(5000);
        let mut sampler =
            AnalogSampler::new(MockAdc::new(&reading, 0), MockDelay::default(), config(None));

        assert_eq!(sampler.sample(), Ok(4095));
    }

    #[test]
    fn test_conversion_timeout() {
        let reading = Cell::new(10);
        let mut sampler = AnalogSampler::new(
            MockAdc::never_done(&reading),
            MockDelay::default(),
            config(Some(5)),
        );

        assert_eq!(sampler.sample(), Err(SampleError::ConversionTimeout));
        // Result register never touched
        assert!(!sampler.adc().steps.contains(&AdcStep::Read));
        assert_eq!(sampler.delay.total_us(), 100 + 5 * 2);
    }

    #[test]
    fn test_unbounded_wait_completes_late() {
        let reading = Cell::new(77);
        let mut sampler = AnalogSampler::new(
            MockAdc::new(&reading, 50_000),
            MockDelay::default(),
            config(None),
        );

        assert_eq!(sampler.sample(), Ok(77));
    }
}
