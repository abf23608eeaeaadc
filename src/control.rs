//! Gesture routing: footswitch gestures in, session operations out.
//!
//! [`GestureRouter`] is a pure state machine; it never touches the
//! session itself but returns the operation the caller should apply.
//! That keeps every cross-switch interlock testable on the host.
//!
//! Rules, in priority order:
//!
//! 1. Long-press on one nav switch while the other is already
//!    long-pressed is the two-switch combo: toggle the tuner and latch
//!    scroll off until a fresh single long-press.
//! 2. Sustained hold scrolls patches at the auto-cycle cadence, but only
//!    with the tuner off, the latch clear and the other nav switch up.
//! 3. A short tap steps one patch when the tuner is off and the other
//!    switch is not mid long-press.
//! 4. A tap on the bypass switch toggles bypass (single slot or all
//!    slots, per configuration) when nothing else is in progress.
//! 5. Releasing a long press clears that switch's flags and re-arms the
//!    scroll cadence gate.

use crate::button::Gesture;

/// Physical switch roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PedalSwitch {
    /// Step to the previous patch.
    Prev,
    /// Step to the next patch.
    Next,
    /// Toggle bypass.
    Bypass,
}

impl PedalSwitch {
    fn direction(self) -> i8 {
        match self {
            PedalSwitch::Prev => -1,
            PedalSwitch::Next => 1,
            PedalSwitch::Bypass => 0,
        }
    }
}

/// Session operation requested by the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RouterAction {
    /// Step the patch index by the given delta.
    PatchStep(i8),
    ToggleTuner,
    ToggleBypass,
    ToggleFullBypass,
}

#[derive(Clone, Copy, Default)]
struct SwitchFlags {
    down: bool,
    longpressed: bool,
}

/// Maps gestures from the footswitches to session operations.
pub struct GestureRouter {
    prev: SwitchFlags,
    next: SwitchFlags,
    /// Set by the tuner combo; suppresses scroll until the next single
    /// long-press, so slightly staggered releases don't step patches.
    cancel_scroll: bool,
    last_step_ms: u32,
    cycle_ms: u32,
    full_bypass: bool,
}

impl GestureRouter {
    /// `cycle_ms` is the auto-scroll cadence; `full_bypass` selects the
    /// all-slots bypass variant for the bypass switch.
    pub fn new(cycle_ms: u32, full_bypass: bool) -> Self {
        Self {
            prev: SwitchFlags::default(),
            next: SwitchFlags::default(),
            cancel_scroll: false,
            last_step_ms: 0,
            cycle_ms,
            full_bypass,
        }
    }

    /// Feed one gesture; returns the operation to apply, if any.
    ///
    /// `tuner_enabled` is the session's current tuner state - the router
    /// keeps no copy of it.
    pub fn on_gesture(
        &mut self,
        switch: PedalSwitch,
        gesture: Gesture,
        now_ms: u32,
        tuner_enabled: bool,
    ) -> Option<RouterAction> {
        if switch == PedalSwitch::Bypass {
            return self.on_bypass_gesture(gesture, tuner_enabled);
        }

        let other_longpressed = self.other(switch).longpressed;
        let other_down = self.other(switch).down;
        let flags = self.flags(switch);

        match gesture {
            Gesture::Down => {
                flags.down = true;
                None
            }
            Gesture::Up => {
                flags.down = false;
                None
            }
            Gesture::Longpress => {
                flags.longpressed = true;
                if other_longpressed {
                    // Two-switch combo.
                    self.cancel_scroll = true;
                    Some(RouterAction::ToggleTuner)
                } else {
                    self.cancel_scroll = false;
                    None
                }
            }
            Gesture::Hold => {
                if tuner_enabled || self.cancel_scroll || other_down {
                    return None;
                }
                if now_ms.wrapping_sub(self.last_step_ms) < self.cycle_ms {
                    return None;
                }
                self.last_step_ms = now_ms;
                Some(RouterAction::PatchStep(switch.direction()))
            }
            Gesture::Unlongpress => {
                flags.down = false;
                flags.longpressed = false;
                self.last_step_ms = 0;
                None
            }
            Gesture::Click => {
                if tuner_enabled || other_longpressed {
                    return None;
                }
                Some(RouterAction::PatchStep(switch.direction()))
            }
        }
    }

    fn on_bypass_gesture(&mut self, gesture: Gesture, tuner_enabled: bool) -> Option<RouterAction> {
        let scrolling = self.prev.longpressed || self.next.longpressed;
        match gesture {
            Gesture::Click if !tuner_enabled && !scrolling => Some(if self.full_bypass {
                RouterAction::ToggleFullBypass
            } else {
                RouterAction::ToggleBypass
            }),
            // No other bypass-switch gesture is defined.
            _ => None,
        }
    }

    fn flags(&mut self, switch: PedalSwitch) -> &mut SwitchFlags {
        match switch {
            PedalSwitch::Prev => &mut self.prev,
            _ => &mut self.next,
        }
    }

    fn other(&self, switch: PedalSwitch) -> &SwitchFlags {
        match switch {
            PedalSwitch::Prev => &self.next,
            _ => &self.prev,
        }
    }
}
