//! Display surface adapter
//!
//! Wraps a [`PixelDisplay`] and owns the current background color. Erasing
//! text means drawing it again in the background color, so the background
//! must be known to everyone who draws.

use embedded_graphics::pixelcolor::Rgb565;
use tally_hal::{DisplayCommand, DisplayError, PixelDisplay};

use crate::config::BOOT_BACKGROUND;

/// Position and glyph scale of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextPlacement {
    /// Left edge in pixels
    pub x: u8,
    /// Top edge in pixels
    pub y: u8,
    /// Horizontal glyph scale
    pub scale_x: u8,
    /// Vertical glyph scale
    pub scale_y: u8,
}

impl TextPlacement {
    /// Create a placement
    pub const fn new(x: u8, y: u8, scale_x: u8, scale_y: u8) -> Self {
        Self {
            x,
            y,
            scale_x,
            scale_y,
        }
    }
}

/// Drawing surface with a tracked background color
pub struct Surface<D> {
    display: D,
    background: Rgb565,
}

impl<D: PixelDisplay> Surface<D> {
    /// Wrap a display that is showing [`BOOT_BACKGROUND`]
    pub fn new(display: D) -> Self {
        Self {
            display,
            background: BOOT_BACKGROUND,
        }
    }

    /// Current background color
    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Change the background, clearing the whole panel if it differs
    ///
    /// Returns whether a clear was performed.
    pub fn set_background(&mut self, color: Rgb565) -> Result<bool, DisplayError> {
        if self.background == color {
            return Ok(false);
        }

        let previous = self.background;
        self.background = color;
        if let Err(e) = self.clear() {
            // Panel still shows the old color; let a retry clear again
            self.background = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Paint every addressable pixel with the background color
    ///
    /// Streams width × height pixels; only for startup and background
    /// changes.
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        let (width, height) = self.display.size();
        self.display.set_address_bounds(0..width, 0..height)?;

        let pixels = u32::from(width) * u32::from(height);
        self.display.fill_pixels(self.background, pixels)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Surface cleared ({}x{})", width, height);

        Ok(())
    }

    /// Draw text in a color
    pub fn draw_text(
        &mut self,
        placement: TextPlacement,
        text: &str,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.display.draw_text(
            placement.x,
            placement.y,
            placement.scale_x,
            placement.scale_y,
            text,
            color,
        )
    }

    /// Draw text in the background color, removing a previous draw of it
    pub fn erase_text(&mut self, placement: TextPlacement, text: &str) -> Result<(), DisplayError> {
        self.draw_text(placement, text, self.background)
    }

    /// Issue a display-wide command
    pub fn send_command(&mut self, command: DisplayCommand) -> Result<(), DisplayError> {
        self.display.send_command(command)
    }

    /// Get access to the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get mutable access to the underlying display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::colors;
    use crate::mock::MockDisplay;

    #[test]
    fn test_set_background_clears_once() {
        let mut surface = Surface::new(MockDisplay::new());

        assert_eq!(surface.set_background(colors::AZURE), Ok(true));
        assert_eq!(surface.set_background(colors::AZURE), Ok(false));

        let display = surface.display();
        assert_eq!(display.windows, 1);
        assert_eq!(display.pixels, 96 * 96);
        assert_eq!(display.last_pixel, Some(colors::AZURE));
    }

    #[test]
    fn test_boot_background_is_not_cleared() {
        let mut surface = Surface::new(MockDisplay::default());

        assert_eq!(surface.set_background(BOOT_BACKGROUND), Ok(false));
        assert_eq!(surface.display().pixels, 0);
    }

    #[test]
    fn test_erase_uses_background() {
        let mut surface = Surface::new(MockDisplay::new());
        surface.set_background(colors::AZURE).unwrap();

        let at = TextPlacement::new(10, 10, 2, 2);
        surface.draw_text(at, "P:  5", colors::TURQUOISE).unwrap();
        surface.erase_text(at, "P:  5").unwrap();

        let texts = &surface.display().texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].color, colors::TURQUOISE);
        assert_eq!(texts[1].color, colors::AZURE);
        assert_eq!(texts[0].text, texts[1].text);
        assert_eq!(texts[0].placement, texts[1].placement);
    }

    #[test]
    fn test_clear_propagates_errors() {
        let mut display = MockDisplay::new();
        display.fail = true;
        let mut surface = Surface::new(display);

        assert_eq!(
            surface.set_background(colors::AZURE),
            Err(DisplayError::Communication)
        );
    }

    #[test]
    fn test_failed_clear_is_retried() {
        let mut display = MockDisplay::new();
        display.fail = true;
        let mut surface = Surface::new(display);

        assert!(surface.set_background(colors::AZURE).is_err());
        assert_eq!(surface.background(), BOOT_BACKGROUND);

        surface.display_mut().fail = false;
        assert_eq!(surface.set_background(colors::AZURE), Ok(true));
        assert_eq!(surface.display().pixels, 96 * 96);
    }
}
