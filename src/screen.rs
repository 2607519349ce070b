//! Status display layouts.
//!
//! Every screen is a full redraw: clear the page, draw its lines, flush.

use crate::hal::StatusDisplay;
use core::fmt::Write;
use heapless::String;

/// Panel width in pixels.
pub const DISPLAY_WIDTH: i32 = 128;

/// Glyph advance of the display font in pixels.
pub const CHAR_WIDTH: i32 = 8;

/// Vertical pitch of the splash title lines.
pub const SPLASH_LINE_HEIGHT: i32 = 16;

const MARGIN_X: i32 = 5;
const LABEL_X: i32 = 20;
const TITLE_Y: i32 = 8;
const FIRST_OPTION_Y: i32 = 24;
const SECOND_OPTION_Y: i32 = 40;
const HINT_Y: i32 = 10;
const CLOCK_Y: i32 = 24;
const MARKER: &str = "X";
const NO_MARKER: &str = " ";

/// Title lines shown while booting.
pub const SPLASH_LINES: [&str; 4] = ["  Kitchen", " Helper  ", " for Home", " Cooking "];

/// Label in front of a running clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockLabel {
    /// Noodle countdown.
    Remaining,
    /// Bean pressure stopwatch.
    Pressure,
}

impl ClockLabel {
    fn as_str(self) -> &'static str {
        match self {
            ClockLabel::Remaining => "Left",
            ClockLabel::Pressure => "Pressure",
        }
    }
}

/// Formats `seconds` as `<label>: MM:SS`.
///
/// Minutes are not wrapped, so very long runs read e.g. `Pressure: 125:07`.
pub fn format_clock(label: ClockLabel, seconds: u64) -> String<32> {
    let mut text = String::new();
    // 32 bytes always fit the longest label plus a u64 minute count
    let _ = write!(text, "{}: {:02}:{:02}", label.as_str(), seconds / 60, seconds % 60);
    text
}

/// X position that centers `text` on the panel, never left of the edge.
pub fn centered_x(text: &str) -> i32 {
    let width = text.len() as i32 * CHAR_WIDTH;
    ((DISPLAY_WIDTH - width) / 2).max(0)
}

fn draw_choice<D: StatusDisplay>(display: &mut D, title: &str, options: [&str; 2], selected: usize) {
    display.clear();
    display.draw_text(MARGIN_X, TITLE_Y, title);

    for (index, (label, y)) in options.iter().zip([FIRST_OPTION_Y, SECOND_OPTION_Y]).enumerate() {
        let marker = if index == selected { MARKER } else { NO_MARKER };
        display.draw_text(MARGIN_X, y, marker);
        display.draw_text(LABEL_X, y, label);
    }

    display.flush();
}

/// Main menu with the mode options; `selected` is 0 or 1.
pub fn draw_menu<D: StatusDisplay>(display: &mut D, selected: usize) {
    draw_choice(display, "Main Menu", ["Noodle Mode", "Bean Mode"], selected);
}

/// Noodle preset picker; `selected` is 0 (short) or 1 (long).
pub fn draw_noodle_presets<D: StatusDisplay>(display: &mut D, selected: usize) {
    draw_choice(display, "Noodle Timer", ["3 minutes", "10 minutes"], selected);
}

/// Running clock with the back hint above it.
pub fn draw_clock<D: StatusDisplay>(display: &mut D, label: ClockLabel, seconds: u64) {
    let text = format_clock(label, seconds);

    display.clear();
    display.draw_text(MARGIN_X, HINT_Y, "Press B: back");
    display.draw_text(centered_x(&text), CLOCK_Y, &text);
    display.flush();
}

/// Waiting for the pot to get loud.
pub fn draw_monitoring<D: StatusDisplay>(display: &mut D) {
    display.clear();
    display.draw_text(MARGIN_X, CLOCK_Y, "Monitoring...");
    display.flush();
}

/// Boot title.
pub fn draw_splash<D: StatusDisplay>(display: &mut D) {
    display.clear();
    for (line, text) in SPLASH_LINES.iter().enumerate() {
        display.draw_text(MARGIN_X, line as i32 * SPLASH_LINE_HEIGHT, text);
    }
    display.flush();
}
