//! Peripheral sampling trait

/// Raw peripheral samples consumed once per polling tick
///
/// Implementations handle the actual pin and counter access for the
/// specific board. All methods are synchronous with bounded latency.
pub trait Sensors {
    /// Current level of the encoder push switch
    ///
    /// Raw logic level with the pull-up wiring: `false` means pressed.
    fn encoder_switch_level(&mut self) -> bool;

    /// Current level of the stick push switch (active-low, like the
    /// encoder switch)
    fn stick_switch_level(&mut self) -> bool;

    /// Raw horizontal stick sample, 16-bit full scale (0..=65535)
    fn stick_x(&mut self) -> u16;

    /// Raw vertical stick sample, 16-bit full scale
    fn stick_y(&mut self) -> u16;

    /// Net encoder rotation in detents since startup
    ///
    /// Monotonically tracks rotation: clockwise detents increment,
    /// counter-clockwise detents decrement.
    fn encoder_position(&mut self) -> i32;
}
