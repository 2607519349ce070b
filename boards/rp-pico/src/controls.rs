//! Analog joystick and the two push buttons.

use embedded_hal::digital::InputPin;
use kitchen_monitor::{Axis, Button, ControlPanel};

use crate::analog::{SharedAdc, read_once};

/// ADC input wired to the joystick's horizontal axis (GPIO26).
const X_CHANNEL: u8 = 0;

/// ADC input wired to the joystick's vertical axis (GPIO27).
const Y_CHANNEL: u8 = 1;

/// Joystick on the shared ADC, buttons active low with pull-ups.
pub struct Controls<'a, C: InputPin, B: InputPin> {
    adc: &'a SharedAdc,
    confirm: C,
    back: B,
}

impl<'a, C: InputPin, B: InputPin> Controls<'a, C, B> {
    pub fn new(adc: &'a SharedAdc, confirm: C, back: B) -> Self {
        Self { adc, confirm, back }
    }
}

impl<C: InputPin, B: InputPin> ControlPanel for Controls<'_, C, B> {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => read_once(self.adc, X_CHANNEL),
            Axis::Y => read_once(self.adc, Y_CHANNEL),
        }
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        let level = match button {
            Button::Confirm => self.confirm.is_low(),
            Button::Back => self.back.is_low(),
        };
        level.unwrap_or(false)
    }
}
