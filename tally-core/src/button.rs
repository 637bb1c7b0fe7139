//! Edge-latched button reading
//!
//! Buttons are wired active-low: the line reads low while pressed. A press
//! produces exactly one [`PressEvent`] on the released-to-pressed edge and
//! nothing more until the line has gone high again. There is no timed
//! filtering; the loop period is the only debounce.
//!
//! Each button also drives an indicator LED that is lit while the button is
//! latched.

use tally_hal::{InputPin, OutputPin};

/// A single physical press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent;

/// Press latch for one button
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLatch {
    latched: bool,
}

impl ButtonLatch {
    /// Create a released latch
    pub const fn new() -> Self {
        Self { latched: false }
    }

    /// Whether a press has been reported and not yet released
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Feed one sample of the (already normalized) pressed level
    pub fn update(&mut self, pressed: bool) -> Option<PressEvent> {
        match (self.latched, pressed) {
            (false, true) => {
                self.latched = true;
                Some(PressEvent)
            }
            (true, false) => {
                // Release clears the latch silently
                self.latched = false;
                None
            }
            _ => None,
        }
    }
}

/// Active-low button with an indicator output
pub struct Button<P, L> {
    line: P,
    indicator: L,
    latch: ButtonLatch,
}

impl<P: InputPin, L: OutputPin> Button<P, L> {
    /// Create a button; the indicator is switched off
    pub fn new(line: P, mut indicator: L) -> Self {
        indicator.set_low();
        Self {
            line,
            indicator,
            latch: ButtonLatch::new(),
        }
    }

    /// Sample the line once
    ///
    /// Returns `Some` only on the poll that first sees the line low.
    pub fn poll(&mut self) -> Option<PressEvent> {
        let event = self.latch.update(self.line.is_low());

        let lit = self.latch.is_latched();
        if self.indicator.is_set_high() != lit {
            self.indicator.set_state(lit);
        }

        event
    }

    /// Whether the button is currently latched as pressed
    pub fn is_latched(&self) -> bool {
        self.latch.is_latched()
    }

    /// Indicator output
    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}
