//! Piezo buzzer on a PWM slice.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use kitchen_monitor::Buzzer;
use rp_pico::hal::pwm::{FreeRunning, Pwm5, Slice};

/// PWM counter rate after the integer divider (125 MHz / 125).
const PWM_TICK_HZ: u32 = 1_000_000;

/// Square wave on PWM5 channel A (GPIO10).
pub struct PwmBuzzer<D: DelayNs> {
    slice: Slice<Pwm5, FreeRunning>,
    delay: D,
}

impl<D: DelayNs> PwmBuzzer<D> {
    /// Takes a slice whose channel A is already routed to the buzzer pin.
    pub fn new(mut slice: Slice<Pwm5, FreeRunning>, delay: D) -> Self {
        slice.set_div_int(125u8);
        slice.disable();
        Self { slice, delay }
    }
}

impl<D: DelayNs> Buzzer for PwmBuzzer<D> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        if frequency_hz == 0 {
            self.delay.delay_ms(duration_ms);
            return;
        }

        let top = (PWM_TICK_HZ / frequency_hz).clamp(2, u16::MAX as u32) as u16;
        self.slice.set_top(top);
        let _ = self.slice.channel_a.set_duty_cycle(top / 2);
        self.slice.enable();

        self.delay.delay_ms(duration_ms);

        let _ = self.slice.channel_a.set_duty_cycle(0);
        self.slice.disable();
    }
}
