//! Hardware display backends.
//!
//! Both backends implement [`PatchDisplay`]; `main` picks one at startup
//! from `config::DISPLAY_KIND` and works through `&mut dyn PatchDisplay`
//! from then on.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use st7735_lcd::{Orientation, ST7735};

use crate::ui::view::{patch_label, PatchDisplay};

/// Type alias for the concrete OLED driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// SSD1306 128x32 OLED backend.
pub struct OledDisplay<I2C> {
    dev: Oled<I2C>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 and clear the screen.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut dev = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = dev.init();
        dev.clear_buffer();
        let _ = dev.flush();
        Self { dev }
    }
}

fn small_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn large_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> PatchDisplay for OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.dev.clear_buffer();
        let _ = self.dev.flush();
    }

    fn show_string(&mut self, text: &str, x: u8, y: u8) {
        let origin = Point::new(x as i32 * 6, y as i32 * 10 + 10);
        let _ = Text::new(text, origin, small_style()).draw(&mut self.dev);
        let _ = self.dev.flush();
    }

    fn show_patch(&mut self, index: u8, name: &str) {
        self.dev.clear_buffer();
        let _ = Text::new(name, Point::new(0, 14), large_style()).draw(&mut self.dev);
        let label = patch_label(index);
        let _ = Text::new(&label, Point::new(104, 30), small_style()).draw(&mut self.dev);
        let _ = self.dev.flush();
    }

    fn show_device_info(&mut self, name: &str, fw_version: &str) {
        self.dev.clear_buffer();
        let _ = Text::new(name, Point::new(0, 14), large_style()).draw(&mut self.dev);
        let _ = Text::new(fw_version, Point::new(0, 30), small_style()).draw(&mut self.dev);
        let _ = self.dev.flush();
    }

    fn show_remote_info(&mut self, tag: &str, hash: &str) {
        self.dev.clear_buffer();
        let _ = Text::new(tag, Point::new(0, 10), small_style()).draw(&mut self.dev);
        let _ = Text::new(hash, Point::new(0, 24), small_style()).draw(&mut self.dev);
        let _ = self.dev.flush();
    }
}

/// ST7735 160x80 LCD backend.
pub struct LcdDisplay<SPI, DC, RST> {
    dev: ST7735<SPI, DC, RST>,
}

impl<SPI, DC, RST> LcdDisplay<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Initialise the panel in landscape orientation and blank it.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: &mut impl embedded_hal::delay::DelayNs) -> Self {
        let mut dev = ST7735::new(spi, dc, rst, true, false, 160, 80);
        let _ = dev.init(delay);
        let _ = dev.set_orientation(&Orientation::Landscape);
        let _ = dev.clear(Rgb565::BLACK);
        Self { dev }
    }
}

fn lcd_small_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(Rgb565::WHITE)
        .build()
}

fn lcd_large_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(Rgb565::WHITE)
        .build()
}

impl<SPI, DC, RST> PatchDisplay for LcdDisplay<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn clear(&mut self) {
        let _ = self.dev.clear(Rgb565::BLACK);
    }

    fn show_string(&mut self, text: &str, x: u8, y: u8) {
        let origin = Point::new(x as i32 * 6, y as i32 * 12 + 12);
        let _ = Text::new(text, origin, lcd_small_style()).draw(&mut self.dev);
    }

    fn show_patch(&mut self, index: u8, name: &str) {
        let _ = self.dev.clear(Rgb565::BLACK);
        let _ = Text::new(name, Point::new(4, 28), lcd_large_style()).draw(&mut self.dev);
        let label = patch_label(index);
        let _ = Text::new(&label, Point::new(120, 64), lcd_large_style()).draw(&mut self.dev);
    }

    fn show_device_info(&mut self, name: &str, fw_version: &str) {
        let _ = self.dev.clear(Rgb565::BLACK);
        let _ = Text::new(name, Point::new(4, 28), lcd_large_style()).draw(&mut self.dev);
        let _ = Text::new(fw_version, Point::new(4, 52), lcd_small_style()).draw(&mut self.dev);
    }

    fn show_remote_info(&mut self, tag: &str, hash: &str) {
        let _ = self.dev.clear(Rgb565::BLACK);
        let _ = Text::new(tag, Point::new(4, 16), lcd_small_style()).draw(&mut self.dev);
        let _ = Text::new(hash, Point::new(4, 32), lcd_small_style()).draw(&mut self.dev);
    }
}
