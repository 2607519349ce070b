//! SSD1306 128x64 OLED over I2C, rendered with embedded-graphics.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use kitchen_monitor::{InitError, StatusDisplay};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// Status display with an off-screen frame buffer.
pub struct OledDisplay<I2C> {
    oled: Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>,
}

impl<I2C: embedded_hal::i2c::I2c> OledDisplay<I2C> {
    /// Initializes the panel and blanks it.
    ///
    /// # Errors
    /// `Peripheral` if the panel does not acknowledge its init sequence.
    pub fn new(i2c: I2C) -> Result<Self, InitError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        oled.init().map_err(|_| InitError::Peripheral("SSD1306"))?;
        oled.clear_buffer();
        oled.flush().map_err(|_| InitError::Peripheral("SSD1306"))?;

        Ok(Self { oled })
    }
}

impl<I2C: embedded_hal::i2c::I2c> StatusDisplay for OledDisplay<I2C> {
    fn clear(&mut self) {
        self.oled.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_8X13, BinaryColor::On);
        // drawing into the frame buffer cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.oled);
    }

    fn flush(&mut self) {
        // a missed frame is redrawn on the next tick
        let _ = self.oled.flush();
    }
}
