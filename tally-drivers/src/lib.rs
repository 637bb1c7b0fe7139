//! Device driver implementations
//!
//! This crate provides concrete implementations of the capability traits
//! defined in `tally-hal`, written against `embedded-hal` 1.0 so they run on
//! any chip:
//!
//! - SSD1351 RGB OLED panel ([`ssd1351::Ssd1351`])

#![no_std]
#![deny(unsafe_code)]

pub mod ssd1351;

pub use ssd1351::Ssd1351;
