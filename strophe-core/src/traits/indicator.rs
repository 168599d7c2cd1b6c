//! Visual indicator trait

use crate::color::Rgb;

/// Status pixel and onboard LED control
pub trait Indicator {
    /// Set the status pixel color
    fn set_color(&mut self, color: Rgb);

    /// Set the status pixel brightness (clamped to 0.0..=1.0)
    fn set_brightness(&mut self, brightness: f32);

    /// Drive the onboard LED level directly
    fn set_led(&mut self, on: bool);

    /// One brief blocking blink of the onboard LED
    ///
    /// Visual feedback for a user event. The implementation owns the
    /// timing (tens of milliseconds) and blocks the tick for its
    /// duration; the pulse accompanies the event it follows and must
    /// not be batched or reordered around it.
    fn pulse(&mut self);
}
