//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::ui::view::DisplayKind;

// Input

/// Main loop tick period (ms). Buttons are scanned once per tick.
pub const TICK_MS: u64 = 50;

/// Button debounce window (ms): a raw level must hold this long before
/// it is trusted.
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Hold a footswitch this long (ms) to enter long-press / auto-scroll.
pub const BUTTON_LONGPRESS_MS: u32 = 500;

/// Minimum gap (ms) between two auto-scroll patch steps while a switch
/// is held.
pub const AUTO_CYCLE_MS: u32 = 200;

// MIDI bridge

/// DIN-MIDI baud rate used on the UART link to the USB-host bridge.
pub const MIDI_BAUD: u32 = 31_250;

/// Interval (ms) between polls of the bridge while waiting for a response.
pub const RESPONSE_POLL_MS: u32 = 10;

/// Longest total wait (ms) for a complete response before reporting
/// `Error::Timeout` and treating the pedal as disconnected.
pub const RESPONSE_TIMEOUT_MS: u32 = 500;

/// Settle time (ms) after switching the pedal's editor mode.
pub const EDITOR_SETTLE_MS: u32 = 200;

/// Settle time (ms) after a program change before the patch data query
/// returns the new patch (the pedal needs time to switch).
pub const PRELOAD_SETTLE_MS: u32 = 200;

// Behavior

/// Sweep all patches at startup so navigation can show names instantly.
pub const PRELOAD_PATCH_NAMES: bool = true;

/// `true`: the bypass switch toggles every effect slot; `false`: only
/// slot 0 (treat the first slot as a line selector).
pub const FULL_BYPASS: bool = false;

/// Display backend selected at startup.
pub const DISPLAY_KIND: DisplayKind = DisplayKind::Oled128x32;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`. Adjust for your custom PCB.
//
//   Footswitch PREV   → P0.11
//   Footswitch NEXT   → P0.12
//   Footswitch BYPASS → P0.24
//   Bypass LED        → P0.06
//   Bridge UART TX    → P0.08
//   Bridge UART RX    → P1.08
//   I²C SDA (OLED)    → P0.26
//   I²C SCL (OLED)    → P0.27
//   SPI SCK (LCD)     → P0.14
//   SPI MOSI (LCD)    → P0.13
//   LCD DC / RST / CS → P0.15 / P0.16 / P0.17
