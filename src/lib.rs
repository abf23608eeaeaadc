//! Footswitch remote for Zoom MultiStomp pedals.
//!
//! The library holds everything that behaves the same on host and
//! target - switch debouncing and gesture classification, the gesture
//! router, the MultiStomp protocol (frames, USB-MIDI bridge framing,
//! device session) and the display-facing view layer - and is fully
//! testable with `cargo test`, no hardware required.
//!
//! The embedded binary (`src/main.rs`, behind the `embedded` feature)
//! wires this core to an nRF52840: UART bridge to the pedal, SSD1306 or
//! ST7735 status display, three footswitches and a bypass LED.
//!
//! Data flow, one 50 ms tick at a time:
//!
//! ```text
//! pin levels -> ButtonPad -> Gesture -> GestureRouter -> RouterAction
//!            -> DeviceSession command -> MIDI frame -> bridge
//!            -> response parse -> session state -> PatchDisplay
//! ```

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod config;
pub mod control;
pub mod error;
pub mod midi;
pub mod ui;

pub use button::{ButtonConfig, ButtonPad, Gesture};
pub use control::{GestureRouter, PedalSwitch, RouterAction};
pub use error::Error;
pub use midi::DeviceModel;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
