//! RP2040 (Raspberry Pi Pico) implementations of the kitchen-monitor
//! peripheral traits.

#![no_std]

pub mod analog;
pub mod buzzer;
pub mod controls;
pub mod display;
pub mod time;
pub mod ws2812;
