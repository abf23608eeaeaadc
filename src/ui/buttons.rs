//! Footswitch GPIO input.
//!
//! Three switches (active-low with internal pull-up):
//!   - PREV   - previous patch / scroll down / tuner combo
//!   - NEXT   - next patch / scroll up / tuner combo
//!   - BYPASS - toggle bypass
//!
//! Unlike an edge-interrupt design, the switches are polled once per
//! main-loop tick and fed to the shared debouncer, which keeps the whole
//! input path on one cooperative loop.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

/// Channel indices into the [`crate::button::ButtonPad`].
pub const PREV: usize = 0;
pub const NEXT: usize = 1;
pub const BYPASS: usize = 2;

/// The three footswitch inputs.
pub struct Footswitches<'d> {
    prev: Input<'d>,
    next: Input<'d>,
    bypass: Input<'d>,
}

impl<'d> Footswitches<'d> {
    pub fn new(prev: AnyPin, next: AnyPin, bypass: AnyPin) -> Self {
        Self {
            prev: Input::new(prev, Pull::Up),
            next: Input::new(next, Pull::Up),
            bypass: Input::new(bypass, Pull::Up),
        }
    }

    /// Instantaneous levels, polarity-corrected (true = pressed).
    pub fn levels(&self) -> [bool; 3] {
        [
            self.prev.is_low(),
            self.next.is_low(),
            self.bypass.is_low(),
        ]
    }
}
