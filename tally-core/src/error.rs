//! Error types

pub use tally_hal::DisplayError;

/// Errors from the analog sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Conversion did not complete within the configured poll budget
    ConversionTimeout,
}

/// Errors that stop an iteration of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopError {
    /// Potentiometer sampling failed
    Sample(SampleError),
    /// Drawing to the panel failed
    Display(DisplayError),
}

impl From<SampleError> for LoopError {
    fn from(err: SampleError) -> Self {
        LoopError::Sample(err)
    }
}

impl From<DisplayError> for LoopError {
    fn from(err: DisplayError) -> Self {
        LoopError::Display(err)
    }
}
