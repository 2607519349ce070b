//! Peripheral traits the core drives, and the startup error.
//!
//! Implement these for your board (see `boards/rp-pico`) or with mocks in
//! tests. None of the runtime methods can fail: implementations handle their
//! own hardware errors. Only bring-up may fail, with [`InitError`].

use crate::config::ConfigError;
use crate::matrix::LED_COUNT;
use palette::Srgb;

/// Analog front-end plus the transfer engine feeding it into memory.
///
/// The sampler calls these in order: `drain`, `start`, `is_complete` until
/// true (or `abort` on timeout), `halt`, `read_into`.
pub trait SampleSource {
    /// Selects the input channel and conversion clock. Called once at startup.
    fn configure(&mut self, channel: u8, clock_divisor: f32) -> Result<(), InitError>;

    /// Discards readings still queued from before this acquisition.
    fn drain(&mut self);

    /// Arms a one-shot transfer of `count` samples and starts conversion.
    fn start(&mut self, count: usize);

    /// Returns true once the transfer engine has moved all samples.
    fn is_complete(&mut self) -> bool;

    /// Cancels an in-flight transfer.
    fn abort(&mut self);

    /// Stops the converter.
    fn halt(&mut self);

    /// Copies the last completed batch into `buffer`.
    fn read_into(&mut self, buffer: &mut [u16]);
}

/// A strip of addressable RGB LEDs wired as the 5x5 matrix.
pub trait LedStrip {
    /// Sends one full frame, already in physical strip order.
    fn write(&mut self, frame: &[Srgb<u8>; LED_COUNT]);
}

/// Monochrome text display with an off-screen page buffer.
pub trait StatusDisplay {
    /// Blanks the page buffer.
    fn clear(&mut self);

    /// Draws `text` with its top-left corner at `(x, y)` pixels.
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Pushes the page buffer to the panel.
    fn flush(&mut self);
}

/// Joystick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// Push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Commits the highlighted choice.
    Confirm,
    /// Returns to the menu from anywhere.
    Back,
}

/// Joystick and buttons.
pub trait ControlPanel {
    /// Raw ADC reading of an axis. Values above 4095 are clamped by the caller.
    fn read_axis(&mut self, axis: Axis) -> u16;

    /// Current level of a button, true while held down.
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Piezo buzzer.
pub trait Buzzer {
    /// Plays a square wave and returns once it has finished.
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

/// Fatal errors raised while bringing the system up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Every DMA channel is already claimed.
    NoFreeDmaChannel,

    /// No PIO state machine is left for the LED strip.
    NoFreeStateMachine,

    /// A peripheral refused to initialize.
    Peripheral(&'static str),

    /// The supplied configuration is inconsistent.
    InvalidConfig(ConfigError),
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::NoFreeDmaChannel => write!(f, "no free DMA channel"),
            InitError::NoFreeStateMachine => write!(f, "no free PIO state machine"),
            InitError::Peripheral(name) => write!(f, "failed to initialize {}", name),
            InitError::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

impl From<ConfigError> for InitError {
    fn from(err: ConfigError) -> Self {
        InitError::InvalidConfig(err)
    }
}
