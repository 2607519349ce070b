//! Joystick interpretation and button edge detection.

use crate::config::AXIS_MAX;
use crate::time::{TimeInstant, has_elapsed};

/// Clamps a raw axis reading into the 12-bit range.
///
/// Out-of-range codes come from glitches on the analog input; they are folded
/// back into range instead of being treated as errors.
#[inline]
pub fn clamp_axis(raw: u16) -> u16 {
    raw.min(AXIS_MAX)
}

/// Which of two on-screen options the joystick points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tilt {
    /// Pushed past the high threshold: first option.
    First,
    /// Pushed past the low threshold: second option.
    Second,
    /// Resting between thresholds: keep the current selection.
    Neutral,
}

impl Tilt {
    /// Classifies a clamped axis reading against the two thresholds.
    pub fn from_axis(value: u16, low: u16, high: u16) -> Self {
        if value > high {
            Tilt::First
        } else if value < low {
            Tilt::Second
        } else {
            Tilt::Neutral
        }
    }
}

/// Turns a held button level into single press events.
///
/// A press is reported on the released → pressed edge, and only if at least
/// `debounce_ms` have passed since the previous accepted press.
#[derive(Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    pressed: bool,
    last_press: Option<I>,
    debounce_ms: u64,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer that starts out released.
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            pressed: false,
            last_press: None,
            debounce_ms,
        }
    }

    /// Feeds the current button level; returns true on an accepted press.
    ///
    /// The level is tracked on every call, so an edge rejected inside the
    /// window still counts as held and cannot fire later.
    pub fn check_press(&mut self, is_down: bool, now: I) -> bool {
        let rising = is_down && !self.pressed;
        self.pressed = is_down;
        if !rising {
            return false;
        }

        let settled = match self.last_press {
            Some(last) => has_elapsed(last, now, self.debounce_ms),
            None => true,
        };
        if settled {
            self.last_press = Some(now);
        }
        settled
    }

    /// Marks the button as held so a press already in progress is not reported.
    pub fn suppress(&mut self, is_down: bool) {
        self.pressed = is_down;
    }
}
