//! 5x5 LED matrix model and the intensity feedback driver.
//!
//! The matrix is addressed logically by `(row, col)` and converted to the
//! serpentine strip order only when a frame is flushed. Every render starts
//! from a blank grid, so no state carries over between frames.

use crate::hal::LedStrip;
use crate::intensity::IntensityLevel;
use embedded_hal::delay::DelayNs;
use palette::Srgb;

/// Rows and columns of the matrix.
pub const MATRIX_SIZE: usize = 5;

/// Number of LEDs on the strip.
pub const LED_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

/// Unlit LED.
pub const LED_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

const DIM_BLUE: Srgb<u8> = Srgb::new(0, 0, 1);
const BLUE: Srgb<u8> = Srgb::new(0, 0, 2);
const YELLOW: Srgb<u8> = Srgb::new(1, 1, 0);
const RED: Srgb<u8> = Srgb::new(1, 0, 0);

/// Physical strip index of a logical cell.
///
/// Even rows run left to right, odd rows right to left.
#[inline]
pub const fn serpentine_index(row: usize, col: usize) -> usize {
    if row % 2 == 0 {
        row * MATRIX_SIZE + col
    } else {
        row * MATRIX_SIZE + (MATRIX_SIZE - 1 - col)
    }
}

/// Concentric rings around the center, as logical positions `row * 5 + col`.
const RINGS: [&[u8]; 4] = [
    &[12],
    &[7, 11, 13, 17],
    &[2, 6, 8, 10, 14, 16, 18, 22],
    &[1, 3, 5, 9, 15, 19, 21, 23],
];

/// Ring colors per intensity level, innermost first. `None` leaves a ring dark.
const LEVEL_PATTERNS: [[Option<Srgb<u8>>; 4]; IntensityLevel::COUNT] = [
    [Some(DIM_BLUE), None, None, None],
    [Some(DIM_BLUE), None, None, None],
    [Some(BLUE), Some(DIM_BLUE), None, None],
    [Some(YELLOW), Some(BLUE), Some(DIM_BLUE), None],
    [Some(RED), Some(YELLOW), Some(BLUE), Some(DIM_BLUE)],
];

/// A 5x5 grid of RGB cells in logical orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedMatrix {
    cells: [[Srgb<u8>; MATRIX_SIZE]; MATRIX_SIZE],
}

impl LedMatrix {
    /// Creates a fully unlit matrix.
    pub const fn new() -> Self {
        Self {
            cells: [[LED_OFF; MATRIX_SIZE]; MATRIX_SIZE],
        }
    }

    /// Turns every cell off.
    pub fn clear(&mut self) {
        self.cells = [[LED_OFF; MATRIX_SIZE]; MATRIX_SIZE];
    }

    /// Sets one cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, color: Srgb<u8>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = color;
        }
    }

    /// Sets the cell at logical position `row * 5 + col`.
    pub fn set_position(&mut self, position: usize, color: Srgb<u8>) {
        self.set(position / MATRIX_SIZE, position % MATRIX_SIZE, color);
    }

    /// Color of one cell, `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Srgb<u8>> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True when no cell is lit.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c == LED_OFF)
    }

    /// Lays the grid out in strip order.
    pub fn to_frame(&self) -> [Srgb<u8>; LED_COUNT] {
        let mut frame = [LED_OFF; LED_COUNT];
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, color) in cells.iter().enumerate() {
                frame[serpentine_index(row, col)] = *color;
            }
        }
        frame
    }

    /// Draws the ring pattern for `level` onto the grid.
    pub fn draw_level(&mut self, level: IntensityLevel) {
        let pattern = &LEVEL_PATTERNS[level.value() as usize];
        for (ring, color) in RINGS.iter().zip(pattern.iter()) {
            if let Some(color) = color {
                for &position in ring.iter() {
                    self.set_position(position as usize, *color);
                }
            }
        }
    }

    /// Draws a one-color bitmap; bit 4 of each row byte is column 0.
    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        for (row, bits) in sprite.rows.iter().enumerate() {
            for col in 0..MATRIX_SIZE {
                if bits & (1 << (MATRIX_SIZE - 1 - col)) != 0 {
                    self.set(row, col, sprite.color);
                }
            }
        }
    }
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// One-color 5x5 bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rows: [u8; MATRIX_SIZE],
    pub color: Srgb<u8>,
}

const BOOT_RED: Srgb<u8> = Srgb::new(255, 0, 0);

/// Startup animation: a pulse expanding to the border and back, then two
/// check marks. Row 0 is the first strip row, at the bottom of the board.
pub const BOOT_ANIMATION: [Sprite; 7] = [
    Sprite { rows: [0b00000, 0b00000, 0b00100, 0b00000, 0b00000], color: BOOT_RED },
    Sprite { rows: [0b00000, 0b01110, 0b01010, 0b01110, 0b00000], color: BOOT_RED },
    Sprite { rows: [0b11111, 0b10001, 0b10001, 0b10001, 0b11111], color: BOOT_RED },
    Sprite { rows: [0b00000, 0b01110, 0b01010, 0b01110, 0b00000], color: BOOT_RED },
    Sprite { rows: [0b00000, 0b00000, 0b00100, 0b00000, 0b00000], color: BOOT_RED },
    Sprite { rows: [0b00010, 0b00101, 0b01000, 0b10000, 0b00000], color: Srgb::new(0, 255, 0) },
    Sprite { rows: [0b00010, 0b00101, 0b01000, 0b10000, 0b00000], color: Srgb::new(255, 255, 0) },
];

/// Renders intensity levels onto an LED strip.
///
/// Owns the strip and a scratch grid. Every flush sends all 25 cells and then
/// waits out the strip's latch time before returning.
pub struct FeedbackDriver<L: LedStrip> {
    strip: L,
    matrix: LedMatrix,
    settle_us: u32,
    last_level: Option<IntensityLevel>,
}

impl<L: LedStrip> FeedbackDriver<L> {
    /// Creates a driver. The strip is not touched until the first flush.
    pub fn new(strip: L, settle_us: u32) -> Self {
        Self {
            strip,
            matrix: LedMatrix::new(),
            settle_us,
            last_level: None,
        }
    }

    /// Shows the ring pattern for `level`.
    pub fn render<D: DelayNs>(&mut self, level: IntensityLevel, delay: &mut D) {
        self.matrix.clear();
        self.matrix.draw_level(level);
        self.flush(delay);
        self.last_level = Some(level);
    }

    /// Turns the whole matrix off.
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) {
        self.matrix.clear();
        self.flush(delay);
        self.last_level = None;
    }

    /// Shows an arbitrary grid.
    pub fn show<D: DelayNs>(&mut self, matrix: &LedMatrix, delay: &mut D) {
        self.matrix = *matrix;
        self.flush(delay);
        self.last_level = None;
    }

    /// Plays [`BOOT_ANIMATION`], each frame followed by a blank of equal length.
    pub fn play_boot_animation<D: DelayNs>(&mut self, frame_ms: u32, delay: &mut D) {
        for sprite in BOOT_ANIMATION.iter() {
            let mut frame = LedMatrix::new();
            frame.draw_sprite(sprite);
            self.show(&frame, delay);
            delay.delay_ms(frame_ms);

            self.clear(delay);
            delay.delay_ms(frame_ms);
        }
    }

    /// Grid currently on the strip.
    pub fn matrix(&self) -> &LedMatrix {
        &self.matrix
    }

    /// Level of the last intensity frame, `None` after a clear or sprite.
    pub fn last_level(&self) -> Option<IntensityLevel> {
        self.last_level
    }

    /// Returns a reference to the LED strip.
    pub fn strip(&self) -> &L {
        &self.strip
    }

    fn flush<D: DelayNs>(&mut self, delay: &mut D) {
        self.strip.write(&self.matrix.to_frame());
        delay.delay_us(self.settle_us);
    }
}
