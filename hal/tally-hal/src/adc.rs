//! Analog-to-digital converter abstraction
//!
//! Models a manually-triggered sample-and-hold converter:
//!
//! 1. [`AdcConverter::start_sample`] closes the sampling switch
//! 2. the caller waits out the acquisition time
//! 3. [`AdcConverter::stop_sample_begin_convert`] opens it and starts conversion
//! 4. [`AdcConverter::is_conversion_done`] reports completion
//! 5. [`AdcConverter::read_conversion_result`] fetches the result register
//!
//! Waiting is not part of the trait; the sampler in
//! `tally-core` owns timing.

/// Largest value a 12-bit conversion can produce
pub const ADC_FULL_SCALE: u16 = 4095;

/// Sample-and-hold converter bound to a single input channel
pub trait AdcConverter {
    /// Begin acquiring the input voltage
    fn start_sample(&mut self);

    /// End acquisition and start the conversion
    fn stop_sample_begin_convert(&mut self);

    /// Check whether the conversion started last has completed
    fn is_conversion_done(&self) -> bool;

    /// Read the raw conversion result
    ///
    /// Only meaningful after [`is_conversion_done`](Self::is_conversion_done)
    /// returned `true`.
    fn read_conversion_result(&mut self) -> u16;
}
