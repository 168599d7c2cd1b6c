//! Keymap configuration
//!
//! Layer definitions are loaded once at startup from a TOML document
//! and are immutable for the rest of the run. All embedded names
//! (colors, key actions) resolve at parse time so a bad keymap fails
//! before the poll loop ever starts.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
