//! Configuration types and fixed constants
//!
//! Nothing here is adjustable at runtime; the structs exist so the board
//! crate and the tests can build a loop from one place.

use embedded_graphics::pixelcolor::Rgb565;

use crate::surface::TextPlacement;

/// Named RGB565 colors used by the default layout
pub mod colors {
    use embedded_graphics::pixelcolor::Rgb565;

    /// 0x0000
    pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
    /// 0xF7FF
    pub const AZURE: Rgb565 = Rgb565::new(30, 63, 31);
    /// 0x435C
    pub const ROYAL_BLUE: Rgb565 = Rgb565::new(8, 26, 28);
    /// 0x471A
    pub const TURQUOISE: Rgb565 = Rgb565::new(8, 56, 26);
}

/// Background the panel is assumed to show before the first clear
pub const BOOT_BACKGROUND: Rgb565 = colors::BLACK;

/// Potentiometer movement (in raw counts) that must be exceeded before
/// the displayed reading changes
pub const HYSTERESIS_THRESHOLD: u16 = 8;

/// Analog sampler timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Time the sample-and-hold switch stays closed (µs)
    pub acquisition_us: u32,
    /// Wait between two completion checks (µs)
    pub poll_interval_us: u32,
    /// Completion checks allowed after the first one before giving up
    ///
    /// `None` waits forever, like the bare register loop it replaces.
    pub max_polls: Option<u32>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            acquisition_us: 125,
            poll_interval_us: 1,
            max_polls: Some(10_000), // ~10 ms
        }
    }
}

/// Longest label a field can carry, in bytes
pub const MAX_LABEL_LEN: usize = 3;

/// Where and how a numeric field is drawn
///
/// Build layouts with [`FieldLayout::new`], which rejects labels longer than
/// [`MAX_LABEL_LEN`]; longer labels would not fit the field text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Text in front of the value, e.g. `"S:"`, at most [`MAX_LABEL_LEN`] bytes
    pub label: &'static str,
    /// Position and glyph scale
    pub placement: TextPlacement,
    /// Color the value is drawn in
    pub accent: Rgb565,
}

impl FieldLayout {
    /// Button counter, lower half of the panel
    pub const COUNTER: Self =
        Self::new("S:", TextPlacement::new(10, 60, 2, 2), colors::ROYAL_BLUE);

    /// Potentiometer reading, upper half of the panel
    pub const POTENTIOMETER: Self =
        Self::new("P:", TextPlacement::new(10, 10, 2, 2), colors::TURQUOISE);

    /// Create a layout
    ///
    /// # Panics
    ///
    /// If `label` is longer than [`MAX_LABEL_LEN`]; in a `const` this is a
    /// compile error.
    pub const fn new(label: &'static str, placement: TextPlacement, accent: Rgb565) -> Self {
        assert!(label.len() <= MAX_LABEL_LEN, "field label too long");
        Self {
            label,
            placement,
            accent,
        }
    }
}

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// See [`HYSTERESIS_THRESHOLD`]
    pub hysteresis: u16,
    /// Background applied at startup
    pub background: Rgb565,
    /// Counter field layout
    pub counter: FieldLayout,
    /// Potentiometer field layout
    pub potentiometer: FieldLayout,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            hysteresis: HYSTERESIS_THRESHOLD,
            background: colors::AZURE,
            counter: FieldLayout::COUNTER,
            potentiometer: FieldLayout::POTENTIOMETER,
        }
    }
}
