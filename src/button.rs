//! Footswitch debouncing and gesture classification.
//!
//! A [`ButtonPad`] owns every switch channel plus the shared active-press
//! token, and is driven by calling [`ButtonPad::tick`] once per loop
//! iteration with the instantaneous pin levels. Gestures are reported
//! through a caller-supplied sink:
//!
//! ```text
//! Press switch                          => Down
//! Release (before long-press time)      => Up then Click
//! Keep pressed for long-press time      => Longpress
//! Still pressed on later ticks          => Hold (every tick)
//! Release (after long-press time)       => Unlongpress
//! ```
//!
//! The token models a single foot: the first switch pressed owns the
//! hold/click machinery until it is released. Other switches may still be
//! held at the same time - they debounce independently and report `Down`,
//! `Longpress` and `Unlongpress`, but never `Hold` or `Click`.

/// Gesture reported for one switch channel after debouncing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Debounced press edge.
    Down,
    /// Debounced release edge of a short press.
    Up,
    /// A completed short tap (always follows `Up`).
    Click,
    /// Press held past the long-press threshold.
    Longpress,
    /// Still held after `Longpress`; repeats every tick.
    Hold,
    /// Release edge of a long press (never followed by `Click`).
    Unlongpress,
}

/// Timing parameters shared by all channels of a pad.
#[derive(Clone, Copy, Debug)]
pub struct ButtonConfig {
    /// Minimum stable time (ms) before a raw level is trusted.
    pub debounce_ms: u32,
    /// Held time (ms) at which a press becomes a long press.
    pub longpress_ms: u32,
}

#[derive(Clone, Copy, Default)]
struct ChannelState {
    raw: bool,
    debounced: bool,
    debounce_ts: u32,
    press_ts: u32,
    longpress_fired: bool,
}

/// Debouncer + gesture classifier for `N` footswitches.
pub struct ButtonPad<const N: usize> {
    cfg: ButtonConfig,
    channels: [ChannelState; N],
    /// Channel currently owning the press token, if any.
    owner: Option<usize>,
}

impl<const N: usize> ButtonPad<N> {
    pub fn new(cfg: ButtonConfig) -> Self {
        Self {
            cfg,
            channels: [ChannelState::default(); N],
            owner: None,
        }
    }

    /// Debounced level of a channel (true = pressed).
    pub fn is_pressed(&self, channel: usize) -> bool {
        self.channels[channel].debounced
    }

    /// Scan all channels in fixed order and report gestures.
    ///
    /// `now_ms` is a free-running millisecond clock; wrapping is handled.
    /// `levels[i]` is the instantaneous (already polarity-corrected) level
    /// of channel `i`, true = pressed.
    pub fn tick(&mut self, now_ms: u32, levels: &[bool; N], mut sink: impl FnMut(usize, Gesture)) {
        for i in 0..N {
            let cfg = self.cfg;
            let ch = &mut self.channels[i];

            // Any raw change restarts the debounce timer.
            if levels[i] != ch.raw {
                ch.raw = levels[i];
                ch.debounce_ts = now_ms;
            }

            let stable = now_ms.wrapping_sub(ch.debounce_ts) >= cfg.debounce_ms;

            if stable && ch.raw != ch.debounced {
                ch.debounced = ch.raw;
                if ch.debounced {
                    // Press edge.
                    ch.press_ts = now_ms;
                    sink(i, Gesture::Down);
                    if self.owner.is_none() {
                        self.owner = Some(i);
                    }
                } else {
                    // Release edge.
                    if ch.longpress_fired {
                        ch.longpress_fired = false;
                        sink(i, Gesture::Unlongpress);
                    } else if self.owner == Some(i) {
                        sink(i, Gesture::Up);
                        sink(i, Gesture::Click);
                    } else {
                        sink(i, Gesture::Up);
                    }
                    if self.owner == Some(i) {
                        self.owner = None;
                    }
                }
            } else if ch.debounced {
                // Held steady past the debounce window.
                if !ch.longpress_fired {
                    if now_ms.wrapping_sub(ch.press_ts) >= cfg.longpress_ms {
                        ch.longpress_fired = true;
                        sink(i, Gesture::Longpress);
                    }
                } else if self.owner == Some(i) {
                    sink(i, Gesture::Hold);
                }
            }
        }
    }
}
