//! Analog stick classification
//!
//! Turns raw dual-axis samples into a deadzone-filtered displacement
//! and, for dpad layers, a 4-way direction. Pure functions; the tilt
//! bookkeeping lives in the controller.

use core::f32::consts::{FRAC_PI_2, PI};

use libm::atan2f;

/// Deadzone radius around stick center, in down-scaled units
///
/// One shared tunable for both mouse and dpad layers. The down-scaled
/// axis range is -128..=127, so readings need a hard push to register.
pub const DEADZONE: i32 = 100;

/// Divisor applied to displacement for relative pointer moves
pub const MOUSE_DIVISOR: i32 = 20;

/// Cardinal stick direction for dpad layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Convert raw 16-bit samples to a deadzone-filtered displacement
///
/// Samples are down-scaled by 256 and re-centered on zero. Returns
/// `None` while the stick is inside the deadzone on both axes, and the
/// exact displacement pair otherwise.
pub fn read_displacement(raw_x: u16, raw_y: u16) -> Option<(i32, i32)> {
    let dx = (raw_x >> 8) as i32 - 128;
    let dy = (raw_y >> 8) as i32 - 128;

    if dx.abs() < DEADZONE && dy.abs() < DEADZONE {
        return None;
    }
    Some((dx, dy))
}

/// Classify a non-centered displacement into a cardinal direction
///
/// The displacement angle is rotated by pi so the full circle maps to
/// 0..4 quarter-turns, then split into four 90-degree sectors with
/// half-open boundaries on the diagonals:
///
/// - `[0.5, 1.5)` quarter-turns: Up
/// - `[1.5, 2.5)`: Right
/// - `[2.5, 3.5)`: Down
/// - otherwise: Left
///
/// Caller contract: `(dx, dy)` comes from a non-centered
/// [`read_displacement`] result; the center point has no direction.
pub fn classify_direction(dx: i32, dy: i32) -> Direction {
    let quarter_turns = (atan2f(dy as f32, dx as f32) + PI) / FRAC_PI_2;

    if (0.5..1.5).contains(&quarter_turns) {
        Direction::Up
    } else if (1.5..2.5).contains(&quarter_turns) {
        Direction::Right
    } else if (2.5..3.5).contains(&quarter_turns) {
        Direction::Down
    } else {
        Direction::Left
    }
}
