//! Differential field rendering
//!
//! A field is a labelled number at a fixed spot on the panel. It remembers
//! the value that is currently visible; updating to the same value draws
//! nothing, updating to a new value redraws the old text in the background
//! color and then draws the new text in the accent color.
//!
//! Values are right-aligned in three columns (`"S:  7"`) so that the erase
//! covers the previous glyphs for all values below 1000.

use core::fmt::Write;

use heapless::String;
use tally_hal::{DisplayError, PixelDisplay};

use crate::config::{FieldLayout, MAX_LABEL_LEN};
use crate::surface::Surface;

/// Digits in the widest `u16`
const MAX_VALUE_DIGITS: usize = 5;

/// Formatted field text; fits any label [`FieldLayout::new`] accepts and any `u16`
pub type FieldText = String<{ MAX_LABEL_LEN + MAX_VALUE_DIGITS }>;

/// A numeric value shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    layout: FieldLayout,
    /// Latest value handed to the field
    current: u16,
    /// Value visible on the panel, `None` before the first render
    last_rendered: Option<u16>,
}

impl Field {
    /// Create a field that has never been drawn
    pub const fn new(layout: FieldLayout, initial: u16) -> Self {
        Self {
            layout,
            current: initial,
            last_rendered: None,
        }
    }

    /// Field layout
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Latest value handed to the field
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Value currently visible on the panel
    pub fn last_rendered(&self) -> Option<u16> {
        self.last_rendered
    }

    /// Record a new value without drawing it
    pub(crate) fn set_current(&mut self, value: u16) {
        self.current = value;
    }

    /// Format a value with this field's label
    pub fn text(&self, value: u16) -> FieldText {
        let mut text = FieldText::new();
        let _ = write!(text, "{}{:>3}", self.layout.label, value);
        text
    }
}

/// Show `value` in `field`, drawing only if it differs from what is visible
///
/// Returns whether anything was drawn.
pub fn update_field<D: PixelDisplay>(
    surface: &mut Surface<D>,
    field: &mut Field,
    value: u16,
) -> Result<bool, DisplayError> {
    field.set_current(value);

    if field.last_rendered == Some(value) {
        return Ok(false);
    }

    let placement = field.layout.placement;

    if let Some(old) = field.last_rendered {
        surface.erase_text(placement, &field.text(old))?;
    }
    surface.draw_text(placement, &field.text(value), field.layout.accent)?;

    field.last_rendered = Some(value);
    Ok(true)
}

/// Re-render a field with its current value
pub fn refresh_field<D: PixelDisplay>(
    surface: &mut Surface<D>,
    field: &mut Field,
) -> Result<bool, DisplayError> {
    let value = field.current;
    update_field(surface, field, value)
}
