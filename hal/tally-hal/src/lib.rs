//! Tally Hardware Abstraction Layer
//!
//! This crate defines the primitive capabilities the control loop needs from
//! the board. Chip-specific code (see `tally-firmware`) and device drivers
//! (see `tally-drivers`) implement them; `tally-core` only ever talks to
//! these traits, which keeps the loop testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tally-core (buttons, sampler, render)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tally-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tally-drivers │       │ tally-firmware│
//! │   (ssd1351)   │       │ (rp2040 pins) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital lines
//! - [`adc::AdcConverter`] - Sample-and-hold analog conversion
//! - [`display::PixelDisplay`] - Pixel display drawing capability

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod display;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::{AdcConverter, ADC_FULL_SCALE};
pub use display::{DisplayCommand, DisplayError, PixelDisplay};
pub use gpio::{InputPin, OutputPin};
