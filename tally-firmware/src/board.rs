//! Board bring-up and pin map
//!
//! | Function          | GPIO | Notes                     |
//! |-------------------|------|---------------------------|
//! | S1 (increment)    | 14   | active-low, pull-up       |
//! | S2 (mode)         | 15   | active-low, pull-up       |
//! | LED1              | 12   | lit while S1 is held      |
//! | LED2              | 13   | lit while S2 is held      |
//! | Potentiometer     | 26   | ADC0, 12-bit              |
//! | Panel SCK / MOSI  | 18/19| SPI0                      |
//! | Panel DC / CS     | 20/17|                           |
//! | Panel RST         | 21   | active-low                |

use defmt::*;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::Peripherals;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use tally_drivers::Ssd1351;
use tally_hal::{InputPin, OutputPin};

use crate::adc::RpAdc;

/// Panel SPI clock
const PANEL_SPI_HZ: u32 = 16_000_000;

/// Button input line
pub struct ButtonLine(Input<'static>);

impl InputPin for ButtonLine {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Indicator LED
pub struct Led(Output<'static>);

impl OutputPin for Led {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Panel SPI device (bus + chip select)
pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, spi::Blocking>, Output<'static>, Delay>;

/// Panel driver
pub type Panel = Ssd1351<PanelSpi, Output<'static>>;

/// Initialized board peripherals
pub struct Board {
    pub increment: ButtonLine,
    pub mode: ButtonLine,
    pub increment_led: Led,
    pub mode_led: Led,
    pub potentiometer: RpAdc,
    pub panel: Panel,
    pub panel_reset: Output<'static>,
}

/// One-time setup of every line the firmware uses
pub fn initialize_hardware(p: Peripherals) -> Board {
    // Buttons
    let increment = ButtonLine(Input::new(p.PIN_14, Pull::Up));
    let mode = ButtonLine(Input::new(p.PIN_15, Pull::Up));

    // Indicator LEDs
    let increment_led = Led(Output::new(p.PIN_12, Level::Low));
    let mode_led = Led(Output::new(p.PIN_13, Level::Low));

    // Potentiometer on ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    let potentiometer = RpAdc::new(adc, channel);

    // Panel on SPI0 (TX only)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = PANEL_SPI_HZ;
    let bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let panel_reset = Output::new(p.PIN_21, Level::High);

    let spi_device = unwrap!(ExclusiveDevice::new(bus, cs, Delay));
    let panel = Ssd1351::new(spi_device, dc);

    info!("Board initialized (panel SPI @ {} Hz)", PANEL_SPI_HZ);

    Board {
        increment,
        mode,
        increment_led,
        mode_led,
        potentiometer,
        panel,
        panel_reset,
    }
}
