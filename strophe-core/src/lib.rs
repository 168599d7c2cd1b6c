//! Board-agnostic input core for the Strophe knob controller
//!
//! This crate contains all controller logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits (sensors, HID sink, indicator)
//! - Color parsing for the status pixel
//! - Keymap actions and HID name resolution
//! - Stick deadzone filtering and direction classification
//! - Layer configuration types and TOML parsing
//! - The layer-aware polling state machine

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod config;
pub mod controller;
pub mod keymap;
pub mod stick;
pub mod traits;
