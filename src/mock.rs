//! Test doubles shared by the unit tests.

extern crate std;

use crate::hal::{Axis, Button, Buzzer, ControlPanel, InitError, LedStrip, SampleSource, StatusDisplay};
use crate::matrix::LED_COUNT;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use core::cell::Cell;
use embedded_hal::delay::DelayNs;
use palette::Srgb;
use std::string::{String, ToString};
use std::vec::Vec;

// Mock Duration type
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

// Mock Instant type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Clock the test moves by hand. With `auto_step` set, every read also
/// advances it, which lets a busy-wait loop run into its deadline.
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
    auto_step: Cell<u64>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
            auto_step: Cell::new(0),
        }
    }

    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_auto_step(&self, millis: u64) {
        self.auto_step.set(millis);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        let now = self.current_time.get();
        self.current_time.set(TestInstant(now.0 + self.auto_step.get()));
        now
    }
}

/// Sample source that returns a fixed batch after a number of polls.
pub struct MockSource {
    pub level: u16,
    /// `None` never completes.
    pub polls_until_done: Option<u32>,
    pub configured: Option<(u8, f32)>,
    pub fail_configure: bool,
    pub drains: u32,
    pub starts: u32,
    pub aborts: u32,
    pub halts: u32,
    pub requested: usize,
    polls: u32,
}

impl MockSource {
    pub fn constant(level: u16) -> Self {
        Self {
            level,
            polls_until_done: Some(1),
            configured: None,
            fail_configure: false,
            drains: 0,
            starts: 0,
            aborts: 0,
            halts: 0,
            requested: 0,
            polls: 0,
        }
    }

    pub fn stalled() -> Self {
        Self {
            polls_until_done: None,
            ..Self::constant(2048)
        }
    }
}

impl SampleSource for MockSource {
    fn configure(&mut self, channel: u8, clock_divisor: f32) -> Result<(), InitError> {
        if self.fail_configure {
            return Err(InitError::NoFreeDmaChannel);
        }
        self.configured = Some((channel, clock_divisor));
        Ok(())
    }

    fn drain(&mut self) {
        self.drains += 1;
    }

    fn start(&mut self, count: usize) {
        self.starts += 1;
        self.requested = count;
        self.polls = 0;
    }

    fn is_complete(&mut self) -> bool {
        self.polls += 1;
        match self.polls_until_done {
            Some(limit) => self.polls >= limit,
            None => false,
        }
    }

    fn abort(&mut self) {
        self.aborts += 1;
    }

    fn halt(&mut self) {
        self.halts += 1;
    }

    fn read_into(&mut self, buffer: &mut [u16]) {
        buffer.fill(self.level);
    }
}

/// LED strip that keeps every frame it was sent.
pub struct MockStrip {
    pub frames: Vec<[Srgb<u8>; LED_COUNT]>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn last_frame(&self) -> Option<&[Srgb<u8>; LED_COUNT]> {
        self.frames.last()
    }

    pub fn lit_count(&self) -> usize {
        self.last_frame()
            .map(|frame| frame.iter().filter(|c| **c != Srgb::new(0, 0, 0)).count())
            .unwrap_or(0)
    }
}

impl LedStrip for MockStrip {
    fn write(&mut self, frame: &[Srgb<u8>; LED_COUNT]) {
        self.frames.push(*frame);
    }
}

/// Display that records what was on the page at each flush.
pub struct MockDisplay {
    page: Vec<(i32, i32, String)>,
    pub flushed: Vec<Vec<(i32, i32, String)>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            page: Vec::new(),
            flushed: Vec::new(),
        }
    }

    pub fn last_page(&self) -> &[(i32, i32, String)] {
        self.flushed.last().map(|p| p.as_slice()).unwrap_or(&[])
    }

    pub fn shows(&self, text: &str) -> bool {
        self.last_page().iter().any(|(_, _, t)| t == text)
    }
}

impl StatusDisplay for MockDisplay {
    fn clear(&mut self) {
        self.page.clear();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.page.push((x, y, text.to_string()));
    }

    fn flush(&mut self) {
        self.flushed.push(self.page.clone());
    }
}

/// Joystick and buttons set directly by the test.
pub struct MockControls {
    pub x: u16,
    pub y: u16,
    pub confirm: bool,
    pub back: bool,
}

impl MockControls {
    pub fn centered() -> Self {
        Self {
            x: 2048,
            y: 2048,
            confirm: false,
            back: false,
        }
    }
}

impl ControlPanel for MockControls {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Confirm => self.confirm,
            Button::Back => self.back,
        }
    }
}

/// Buzzer that logs `(frequency_hz, duration_ms)` per tone.
pub struct MockBuzzer {
    pub tones: Vec<(u32, u32)>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self { tones: Vec::new() }
    }
}

impl Buzzer for MockBuzzer {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tones.push((frequency_hz, duration_ms));
    }
}

/// Delay that returns immediately and sums what was asked of it.
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
