//! Display mode state machine
//!
//! Two states, one transition. Toggling sends the panel a display-wide
//! command and then re-renders every field with its current value.
//!
//! The mode starts as [`DisplayMode::Inverse`] while the panel powers up
//! showing RAM as stored, so the first toggle enters [`DisplayMode::Normal`]
//! and inverts the panel. The label and the panel are always opposite;
//! [`DisplayMode::command`] encodes that pairing.

use tally_hal::{DisplayCommand, DisplayError, PixelDisplay};

use crate::field::{refresh_field, Field};
use crate::surface::Surface;

/// Display mode label
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Panel inverted
    Normal,
    /// Panel showing RAM as stored (power-up state)
    #[default]
    Inverse,
}

impl DisplayMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Inverse,
            DisplayMode::Inverse => DisplayMode::Normal,
        }
    }

    /// Panel command issued when entering this mode
    pub fn command(self) -> DisplayCommand {
        match self {
            DisplayMode::Normal => DisplayCommand::InverseDisplay,
            DisplayMode::Inverse => DisplayCommand::NormalDisplay,
        }
    }
}

/// Mode toggle state machine
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeToggle {
    mode: DisplayMode,
}

impl ModeToggle {
    /// Start in the power-up mode
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::default(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip the mode and re-render `fields`
    ///
    /// The mode only changes once the panel accepted the command.
    pub fn toggle<D: PixelDisplay>(
        &mut self,
        surface: &mut Surface<D>,
        fields: &mut [&mut Field],
    ) -> Result<DisplayMode, DisplayError> {
        let next = self.mode.toggled();
        surface.send_command(next.command())?;
        self.mode = next;

        #[cfg(feature = "defmt")]
        defmt::debug!("Display mode -> {}", next);

        for field in fields.iter_mut() {
            refresh_field(surface, field)?;
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{colors, FieldLayout};
    use crate::field::update_field;
    use crate::mock::MockDisplay;

    #[test]
    fn test_toggled_flips() {
        assert_eq!(DisplayMode::Normal.toggled(), DisplayMode::Inverse);
        assert_eq!(DisplayMode::Inverse.toggled(), DisplayMode::Normal);
        assert_eq!(DisplayMode::Normal.toggled().toggled(), DisplayMode::Normal);
    }

    #[test]
    fn test_modes_use_distinct_commands() {
        assert_ne!(DisplayMode::Normal.command(), DisplayMode::Inverse.command());
    }

    #[test]
    fn test_toggle_sequence() {
        let mut surface = Surface::new(MockDisplay::new());
        let mut toggle = ModeToggle::new();
        assert_eq!(toggle.mode(), DisplayMode::Inverse);

        assert_eq!(toggle.toggle(&mut surface, &mut []), Ok(DisplayMode::Normal));
        assert_eq!(
            surface.display().commands.as_slice(),
            &[DisplayMode::Normal.command()]
        );

        assert_eq!(toggle.toggle(&mut surface, &mut []), Ok(DisplayMode::Inverse));
        assert_eq!(
            surface.display().commands.as_slice(),
            &[DisplayMode::Normal.command(), DisplayMode::Inverse.command()]
        );
    }

    #[test]
    fn test_toggle_rerender_is_noop_for_unchanged_fields() {
        let mut surface = Surface::new(MockDisplay::new());
        surface.set_background(colors::AZURE).unwrap();
        let mut counter = Field::new(FieldLayout::COUNTER, 0);
        let mut pot = Field::new(FieldLayout::POTENTIOMETER, 0);
        update_field(&mut surface, &mut counter, 5).unwrap();
        update_field(&mut surface, &mut pot, 700).unwrap();
        surface.display_mut().clear_log();

        let mut toggle = ModeToggle::new();
        toggle
            .toggle(&mut surface, &mut [&mut counter, &mut pot])
            .unwrap();

        assert!(surface.display().texts.is_empty());
        assert_eq!(surface.display().commands.len(), 1);
    }

    #[test]
    fn test_failed_command_keeps_mode() {
        let mut display = MockDisplay::new();
        display.fail = true;
        let mut surface = Surface::new(display);
        let mut toggle = ModeToggle::new();

        assert!(toggle.toggle(&mut surface, &mut []).is_err());
        assert_eq!(toggle.mode(), DisplayMode::Inverse);
    }
}
