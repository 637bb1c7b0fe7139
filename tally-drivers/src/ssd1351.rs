//! SSD1351 OLED Display Driver
//!
//! Driver for SSD1351-based RGB565 OLED panels over 4-wire SPI (separate
//! data/command line). Configured for the 96x96 window used on small
//! click-style boards, where visible column 0 is controller column 16.
//!
//! There is no frame buffer: every write goes straight to panel RAM through
//! an address window. Text is rendered with `embedded-graphics` monospace
//! fonts, scaled up by writing one window per horizontal run of font pixels.

use core::ops::Range;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use tally_hal::{DisplayCommand, DisplayError, PixelDisplay};

/// Visible width in pixels
pub const WIDTH: u8 = 96;
/// Visible height in pixels
pub const HEIGHT: u8 = 96;
/// Controller column of visible column 0
pub const COLUMN_OFFSET: u8 = 16;

/// Pixels per SPI write when streaming a solid run
const FILL_CHUNK_PIXELS: usize = 32;

/// SSD1351 commands
#[allow(dead_code)]
mod cmd {
    pub const SET_COLUMN: u8 = 0x15;
    pub const WRITE_RAM: u8 = 0x5C;
    pub const SET_ROW: u8 = 0x75;
    pub const SET_REMAP: u8 = 0xA0;
    pub const SET_START_LINE: u8 = 0xA1;
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PRECHARGE: u8 = 0xB1;
    pub const SET_CLOCK_DIV: u8 = 0xB3;
    pub const SET_VSL: u8 = 0xB4;
    pub const SET_SECOND_PRECHARGE: u8 = 0xB6;
    pub const SET_VCOMH: u8 = 0xBE;
    pub const SET_CONTRAST: u8 = 0xC1;
    pub const SET_MASTER_CURRENT: u8 = 0xC7;
    pub const SET_MUX_RATIO: u8 = 0xCA;
    pub const SET_COMMAND_LOCK: u8 = 0xFD;
}

/// SSD1351 OLED driver
pub struct Ssd1351<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> Ssd1351<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SSD1351 driver
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Hardware-reset and initialize the panel
    pub fn init<RST, D>(&mut self, reset: &mut RST, delay: &mut D) -> Result<(), DisplayError>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        reset.set_low().map_err(|_| DisplayError::Communication)?;
        delay.delay_ms(1);
        reset.set_high().map_err(|_| DisplayError::Communication)?;
        delay.delay_ms(10);

        // Initialization sequence for the 96x96 window
        let init_cmds: &[(u8, &[u8])] = &[
            (cmd::SET_COMMAND_LOCK, &[0x12]), // Unlock
            (cmd::SET_COMMAND_LOCK, &[0xB1]), // Unlock restricted commands
            (cmd::DISPLAY_OFF, &[]),
            (cmd::SET_CLOCK_DIV, &[0xF1]),
            (cmd::SET_MUX_RATIO, &[HEIGHT - 1]),
            (cmd::SET_REMAP, &[0x32]), // 65k colors, column remap
            (cmd::SET_START_LINE, &[0x00]),
            (cmd::SET_DISPLAY_OFFSET, &[0x00]),
            (cmd::SET_PRECHARGE, &[0x32]),
            (cmd::SET_VCOMH, &[0x05]),
            (cmd::SET_NORMAL, &[]),
            (cmd::SET_CONTRAST, &[0x8A, 0x51, 0x8A]),
            (cmd::SET_MASTER_CURRENT, &[0xCF]),
            (cmd::SET_VSL, &[0xA0, 0xB5, 0x55]),
            (cmd::SET_SECOND_PRECHARGE, &[0x01]),
            (cmd::DISPLAY_ON, &[]),
        ];

        for &(c, data) in init_cmds {
            self.command(c, data)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("SSD1351 initialized");

        Ok(())
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(&[cmd])
            .map_err(|_| DisplayError::Communication)?;

        if !params.is_empty() {
            self.data(params)?;
        }

        Ok(())
    }

    /// Send data bytes
    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::Communication)?;
        self.spi.write(data).map_err(|_| DisplayError::Communication)
    }

    /// Release the bus and data/command line
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> PixelDisplay for Ssd1351<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn size(&self) -> (u8, u8) {
        (WIDTH, HEIGHT)
    }

    fn set_address_bounds(&mut self, columns: Range<u8>, rows: Range<u8>) -> Result<(), DisplayError> {
        if columns.is_empty() || rows.is_empty() || columns.end > WIDTH || rows.end > HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.command(
            cmd::SET_COLUMN,
            &[columns.start + COLUMN_OFFSET, columns.end - 1 + COLUMN_OFFSET],
        )?;
        self.command(cmd::SET_ROW, &[rows.start, rows.end - 1])?;
        self.command(cmd::WRITE_RAM, &[])
    }

    fn send_pixel_color(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.data(&color.into_storage().to_be_bytes())
    }

    fn fill_pixels(&mut self, color: Rgb565, count: u32) -> Result<(), DisplayError> {
        let [high, low] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK_PIXELS * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = high;
            pair[1] = low;
        }

        self.dc.set_high().map_err(|_| DisplayError::Communication)?;

        let mut remaining = count as usize;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK_PIXELS);
            self.spi
                .write(&chunk[..n * 2])
                .map_err(|_| DisplayError::Communication)?;
            remaining -= n;
        }

        Ok(())
    }

    fn draw_text(
        &mut self,
        x: u8,
        y: u8,
        scale_x: u8,
        scale_y: u8,
        text: &str,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }

        let mut target = Scaled {
            display: self,
            x,
            y,
            scale_x: scale_x.max(1),
            scale_y: scale_y.max(1),
        };

        // Foreground only: untouched pixels keep whatever is on the panel
        let style = MonoTextStyle::new(&FONT_5X8, color);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut target)?;

        Ok(())
    }

    fn send_command(&mut self, command: DisplayCommand) -> Result<(), DisplayError> {
        match command {
            DisplayCommand::NormalDisplay => self.command(cmd::SET_NORMAL, &[]),
            DisplayCommand::InverseDisplay => self.command(cmd::SET_INVERSE, &[]),
        }
    }
}

/// Draw target that blows each pixel up to a `scale_x` × `scale_y` block
/// at an offset
///
/// Horizontally adjacent pixels of one color are merged into a single
/// window so a glyph row costs one window setup per run, not per pixel.
struct Scaled<'a, D> {
    display: &'a mut D,
    x: u8,
    y: u8,
    scale_x: u8,
    scale_y: u8,
}

/// Horizontal run of same-colored source pixels
#[derive(Clone, Copy)]
struct Run {
    start: Point,
    len: i32,
    color: Rgb565,
}

impl Run {
    fn extends_to(&self, point: Point, color: Rgb565) -> bool {
        self.color == color && point.y == self.start.y && point.x == self.start.x + self.len
    }
}

impl<D: PixelDisplay> Scaled<'_, D> {
    fn fill_run(&mut self, run: Run) -> Result<(), DisplayError> {
        let (width, height) = self.display.size();
        let scale_x = i32::from(self.scale_x);
        let scale_y = i32::from(self.scale_y);

        let left = i32::from(self.x) + run.start.x * scale_x;
        let top = i32::from(self.y) + run.start.y * scale_y;
        let bottom = top + scale_y;

        if left < 0 || top < 0 || bottom > i32::from(height) {
            return Ok(());
        }

        // Keep only the blocks that fit entirely on the panel
        let fitting = (i32::from(width) - left).max(0) / scale_x;
        let len = run.len.min(fitting);
        if len == 0 {
            return Ok(());
        }
        let right = left + len * scale_x;

        let columns = (left as u8)..(right as u8);
        let rows = (top as u8)..(bottom as u8);
        self.display.set_address_bounds(columns, rows)?;
        self.display.fill_pixels(run.color, (len * scale_x * scale_y) as u32)
    }
}

impl<D: PixelDisplay> OriginDimensions for Scaled<'_, D> {
    fn size(&self) -> Size {
        let (width, height) = self.display.size();
        Size::new(
            u32::from(width.saturating_sub(self.x) / self.scale_x),
            u32::from(height.saturating_sub(self.y) / self.scale_y),
        )
    }
}

impl<D: PixelDisplay> DrawTarget for Scaled<'_, D> {
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mut pending: Option<Run> = None;

        for Pixel(point, color) in pixels {
            match pending.as_mut() {
                Some(run) if run.extends_to(point, color) => run.len += 1,
                _ => {
                    if let Some(run) = pending.take() {
                        self.fill_run(run)?;
                    }
                    pending = Some(Run {
                        start: point,
                        len: 1,
                        color,
                    });
                }
            }
        }

        if let Some(run) = pending {
            self.fill_run(run)?;
        }
        Ok(())
    }
}
