//! Configuration type definitions

use heapless::{String, Vec};

use crate::color::Rgb;
use crate::keymap::KeyAction;

/// Maximum layer name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum layers per config
pub const MAX_LAYERS: usize = 8;

/// Directional key bindings for a dpad layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpadActions {
    pub up: KeyAction,
    pub down: KeyAction,
    pub left: KeyAction,
    pub right: KeyAction,
}

/// What a tilted stick does on this layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StickMode {
    /// Relative pointer movement, scaled every tick while tilted
    #[default]
    Mouse,
    /// Four directional keys, pressed at tilt-onset and released on
    /// the untilt edge
    Dpad(DpadActions),
}

/// One keymap layer
///
/// Built once from a config record; owned by the layer list for its
/// whole lifetime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerConfig {
    /// Display name, reported when the layer activates
    pub name: String<MAX_NAME_LEN>,
    /// Status pixel color while this layer is active
    pub color: Rgb,
    /// Action tapped on a clockwise encoder detent
    pub encoder_cw: KeyAction,
    /// Action tapped on a counter-clockwise detent
    pub encoder_ccw: KeyAction,
    /// Stick behavior
    pub stick: StickMode,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Rgb::BLACK,
            encoder_cw: KeyAction::NoOp,
            encoder_ccw: KeyAction::NoOp,
            stick: StickMode::Mouse,
        }
    }
}

/// Full device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobConfig {
    /// Global status pixel brightness (0.0..=1.0)
    pub brightness: f32,
    /// Ordered layer list; the controller requires at least one entry
    pub layers: Vec<LayerConfig, MAX_LAYERS>,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KnobConfig {
    pub fn new() -> Self {
        Self {
            brightness: 1.0,
            layers: Vec::new(),
        }
    }
}
