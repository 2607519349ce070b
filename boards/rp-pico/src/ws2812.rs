//! 5x5 WS2812 matrix on PIO0, driven through `ws2812-pio`.

use fugit::HertzU32;
use kitchen_monitor::{LED_COUNT, LedStrip, Srgb};
use rp_pico::hal::gpio::bank0::Gpio7;
use rp_pico::hal::gpio::{FunctionPio0, Pin, PullDown};
use rp_pico::hal::pac::PIO0;
use rp_pico::hal::pio::{PIO, SM0, UninitStateMachine};
use smart_leds::{RGB8, SmartLedsWrite};
use ws2812_pio::Ws2812Direct;

/// Data pin of the matrix.
pub type LedPin = Pin<Gpio7, FunctionPio0, PullDown>;

/// Matrix strip on PIO0 / SM0.
pub struct Ws2812 {
    driver: Ws2812Direct<PIO0, SM0, LedPin>,
}

impl Ws2812 {
    /// Loads the WS2812 program into PIO0 and starts it on `pin`.
    pub fn new(
        pin: LedPin,
        pio: &mut PIO<PIO0>,
        sm: UninitStateMachine<(PIO0, SM0)>,
        clock_freq: HertzU32,
    ) -> Self {
        Self {
            driver: Ws2812Direct::new(pin, pio, sm, clock_freq),
        }
    }
}

impl LedStrip for Ws2812 {
    fn write(&mut self, frame: &[Srgb<u8>; LED_COUNT]) {
        let pixels = frame
            .iter()
            .map(|color| RGB8::new(color.red, color.green, color.blue));
        // the PIO FIFO write cannot fail
        let _ = self.driver.write(pixels);
    }
}
