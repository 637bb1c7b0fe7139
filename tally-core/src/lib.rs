//! Board-agnostic core logic for the Tally firmware
//!
//! This crate contains everything with state in the firmware; the rest is
//! peripheral bring-up and panel plumbing:
//!
//! - Edge-latched button reading with indicator LEDs
//! - Blocking analog sampling with a bounded completion wait
//! - Differential field rendering (erase old glyphs, draw new ones)
//! - Normal/inverse display mode toggling
//! - The polling control loop tying them together
//!
//! All hardware access goes through the traits in `tally-hal`.

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod control;
pub mod error;
pub mod field;
pub mod mode;
pub mod sampler;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use button::{Button, ButtonLatch, PressEvent};
pub use config::{FieldLayout, LoopConfig, SamplerConfig, MAX_LABEL_LEN};
pub use control::{exceeds_hysteresis, ControlLoop, DisplayState, StepReport};
pub use error::{LoopError, SampleError};
pub use field::{refresh_field, update_field, Field};
pub use mode::{DisplayMode, ModeToggle};
pub use sampler::AnalogSampler;
pub use surface::{Surface, TextPlacement};
