//! Pixel display capability
//!
//! The lowest-level drawing interface the core needs: an address window,
//! a pixel stream into that window, scaled text and a handful of
//! display-wide commands. Colors are RGB565.

use core::ops::Range;

use embedded_graphics::pixelcolor::Rgb565;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus communication with the panel failed
    Communication,
    /// Coordinates or address window outside the panel
    InvalidCoordinates,
}

/// Display-wide commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Show RAM contents as stored
    NormalDisplay,
    /// Show RAM contents with every color inverted
    InverseDisplay,
}

/// Pixel display drawing capability
pub trait PixelDisplay {
    /// Visible area in pixels as (width, height)
    fn size(&self) -> (u8, u8);

    /// Restrict subsequent pixel writes to a window
    ///
    /// Ranges are half-open; `0..96, 0..96` addresses a full 96x96 panel.
    fn set_address_bounds(&mut self, columns: Range<u8>, rows: Range<u8>)
        -> Result<(), DisplayError>;

    /// Write the next pixel of the current window
    fn send_pixel_color(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Write `count` pixels of one color into the current window
    ///
    /// Drivers should override this to stream the run in as few bus
    /// transfers as they can.
    fn fill_pixels(&mut self, color: Rgb565, count: u32) -> Result<(), DisplayError> {
        for _ in 0..count {
            self.send_pixel_color(color)?;
        }
        Ok(())
    }

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// Only glyph foreground pixels are written. Drawing the same text at the
    /// same position and scale in another color therefore covers exactly the
    /// same pixels.
    fn draw_text(
        &mut self,
        x: u8,
        y: u8,
        scale_x: u8,
        scale_y: u8,
        text: &str,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Issue a display-wide command
    fn send_command(&mut self, command: DisplayCommand) -> Result<(), DisplayError>;
}
