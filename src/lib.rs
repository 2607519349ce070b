#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`KitchenApp`**: The device: menu, noodle countdown and bean pressure monitor, one `tick()` per loop
//! - **`Sampler`**: One-shot, deadline-bounded batch acquisition from a `SampleSource`
//! - **`Classifier`**: Maps a sample batch to an `IntensityLevel` in `0..=4`
//! - **`FeedbackDriver`**: Renders intensity levels as concentric rings on the 5x5 `LedMatrix`
//! - **`KitchenTimer`**: Countdown or stopwatch recomputed from a monotonic clock
//! - **`SampleSource`**, **`LedStrip`**, **`StatusDisplay`**, **`ControlPanel`**, **`Buzzer`**: Traits to implement for your board
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Config`**: Thresholds, presets and timing, validated at startup
//!
//! Pixel colors are raw `Srgb<u8>` channel values as sent to the strip. The
//! reference palette is deliberately dim (channel values of 1 or 2).

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod hal;
pub mod input;
pub mod intensity;
pub mod matrix;
pub mod sampler;
pub mod screen;
pub mod time;
pub mod timer;

#[cfg(test)]
mod mock;

pub use app::{KitchenApp, MenuOption, NoodlePreset, Peripherals, SystemState};
pub use config::{Config, ConfigError, DEFAULT_SAMPLE_COUNT};
pub use hal::{Axis, Button, Buzzer, ControlPanel, InitError, LedStrip, SampleSource, StatusDisplay};
pub use intensity::{Classifier, IntensityLevel};
pub use matrix::{FeedbackDriver, LED_COUNT, LED_OFF, LedMatrix, MATRIX_SIZE, serpentine_index};
pub use sampler::{AcquisitionError, SampleBuffer, Sampler};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use timer::{KitchenTimer, TimerMode, TimerStatus};
