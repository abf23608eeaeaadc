//! Display-facing interface and pure label formatting.

use core::fmt::Write;

use heapless::String;

use crate::midi::MAX_PATCHES;

/// Display backend selection, applied once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayKind {
    /// SSD1306 128x32 OLED over I²C.
    Oled128x32,
    /// ST7735 160x80 LCD over SPI.
    Lcd160x80,
}

/// What the firmware needs from a status display.
///
/// `x`/`y` are character-cell coordinates; each backend maps them to its
/// own geometry.
pub trait PatchDisplay {
    fn clear(&mut self);
    fn show_string(&mut self, text: &str, x: u8, y: u8);
    fn show_patch(&mut self, index: u8, name: &str);
    fn show_device_info(&mut self, name: &str, fw_version: &str);
    fn show_remote_info(&mut self, tag: &str, hash: &str);
}

/// 1-based, zero-padded patch number, the way the pedal prints it
/// ("01".."50").
pub fn patch_label(index: u8) -> String<4> {
    let mut label = String::new();
    let _ = write!(label, "{:02}", index + 1);
    label
}

/// Progress line for the preload sweep ("42 %").
pub fn preload_label(index: u8) -> String<8> {
    let percent = index as u32 * 100 / (MAX_PATCHES as u32 - 1);
    let mut label = String::new();
    let _ = write!(label, "{} %", percent);
    label
}
