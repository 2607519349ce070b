//! Shared test infrastructure for kitchen-monitor integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use kitchen_monitor::{
    Axis, Button, Buzzer, ControlPanel, InitError, KitchenApp, LED_COUNT, LedStrip, Peripherals,
    SampleSource, Srgb, StatusDisplay, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Peripherals
// ============================================================================

/// Microphone that always reads one code and completes on the first poll
pub struct MockMic {
    pub level: u16,
}

impl SampleSource for MockMic {
    fn configure(&mut self, _channel: u8, _clock_divisor: f32) -> Result<(), InitError> {
        Ok(())
    }

    fn drain(&mut self) {}

    fn start(&mut self, _count: usize) {}

    fn is_complete(&mut self) -> bool {
        true
    }

    fn abort(&mut self) {}

    fn halt(&mut self) {}

    fn read_into(&mut self, buffer: &mut [u16]) {
        buffer.fill(self.level);
    }
}

/// LED strip that only keeps the latest frame
pub struct MockStrip {
    pub frame: [Srgb<u8>; LED_COUNT],
    pub writes: usize,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            frame: [Srgb::new(0, 0, 0); LED_COUNT],
            writes: 0,
        }
    }

    pub fn lit(&self) -> usize {
        self.frame
            .iter()
            .filter(|c| **c != Srgb::new(0, 0, 0))
            .count()
    }
}

impl LedStrip for MockStrip {
    fn write(&mut self, frame: &[Srgb<u8>; LED_COUNT]) {
        self.frame = *frame;
        self.writes += 1;
    }
}

/// Display that keeps the text of the last flushed page
pub struct MockDisplay {
    page: heapless::Vec<heapless::String<32>, 8>,
    pub shown: heapless::Vec<heapless::String<32>, 8>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            page: heapless::Vec::new(),
            shown: heapless::Vec::new(),
        }
    }

    pub fn shows(&self, text: &str) -> bool {
        self.shown.iter().any(|line| line.as_str() == text)
    }
}

impl StatusDisplay for MockDisplay {
    fn clear(&mut self) {
        self.page.clear();
    }

    fn draw_text(&mut self, _x: i32, _y: i32, text: &str) {
        let mut line = heapless::String::new();
        let _ = line.push_str(text);
        let _ = self.page.push(line);
    }

    fn flush(&mut self) {
        self.shown = self.page.clone();
    }
}

/// Joystick and buttons set directly by the test
pub struct MockControls {
    pub x: u16,
    pub confirm: bool,
    pub back: bool,
}

impl ControlPanel for MockControls {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => 2048,
        }
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Confirm => self.confirm,
            Button::Back => self.back,
        }
    }
}

/// Buzzer that counts tones
pub struct MockBuzzer {
    pub tones: heapless::Vec<(u32, u32), 8>,
}

impl Buzzer for MockBuzzer {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        let _ = self.tones.push((frequency_hz, duration_ms));
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestApp<'t> = KitchenApp<
    't,
    TestInstant,
    MockTimeSource,
    MockMic,
    MockStrip,
    MockDisplay,
    MockControls,
    MockBuzzer,
    NoDelay,
    32,
>;

pub fn peripherals(
    mic_level: u16,
) -> Peripherals<MockMic, MockStrip, MockDisplay, MockControls, MockBuzzer, NoDelay> {
    Peripherals {
        source: MockMic { level: mic_level },
        strip: MockStrip::new(),
        display: MockDisplay::new(),
        controls: MockControls {
            x: 2048,
            confirm: false,
            back: false,
        },
        buzzer: MockBuzzer {
            tones: heapless::Vec::new(),
        },
        delay: NoDelay,
    }
}

/// Hold `button` for one tick, then release it on a tick past the debounce window
pub fn click(app: &mut TestApp<'_>, timer: &MockTimeSource, button: Button) {
    set(app, button, true);
    app.tick();
    set(app, button, false);
    timer.advance(TestDuration(250));
    app.tick();
}

fn set(app: &mut TestApp<'_>, button: Button, down: bool) {
    let controls = app.controls_mut();
    match button {
        Button::Confirm => controls.confirm = down,
        Button::Back => controls.back = down,
    }
}
