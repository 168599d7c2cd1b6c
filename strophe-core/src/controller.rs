//! Layer-aware polling state machine
//!
//! [`KnobController`] owns all mutable input state: the active layer
//! index, last-known encoder position and switch levels, and the stick
//! tilt state. One [`poll_tick`](KnobController::poll_tick) consumes a
//! sensor snapshot and emits output calls; collaborators are injected
//! per call so the controller itself stays hardware-free.

use crate::config::{KnobConfig, LayerConfig, StickMode};
use crate::keymap::KeyAction;
use crate::stick::{self, Direction, MOUSE_DIVISOR};
use crate::traits::{HidSink, Indicator, Sensors};

/// Errors that can occur when constructing the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Configuration contains zero layers
    EmptyLayerList,
}

/// Stick tilt bookkeeping
///
/// Tracks the centered/tilted hysteresis and, for dpad layers, which
/// directional action is currently held so the matching release goes
/// out later. At most one direction is held at a time; the held action
/// is remembered by value because the active layer can change while
/// the stick is still tilted.
#[derive(Debug, Clone, Copy, Default)]
struct StickState {
    tilted: bool,
    held: Option<(Direction, KeyAction)>,
}

/// The input state machine tying layers, stick, and encoder together
pub struct KnobController {
    config: KnobConfig,
    /// Active layer index, always in 0..config.layers.len()
    layer_index: usize,
    /// Last observed encoder detent count
    last_position: i32,
    /// Last observed raw switch levels (active-low)
    encoder_switch_level: bool,
    stick_switch_level: bool,
    stick: StickState,
}

impl KnobController {
    /// Build the controller and activate the first layer
    ///
    /// Samples the current switch levels and encoder position so the
    /// first tick sees no spurious edges, applies the configured pixel
    /// brightness, and activates layer 0. Fails with
    /// [`ControllerError::EmptyLayerList`] rather than proceeding into
    /// an undefined first-layer load.
    pub fn new<S: Sensors, I: Indicator>(
        config: KnobConfig,
        sensors: &mut S,
        indicator: &mut I,
    ) -> Result<Self, ControllerError> {
        if config.layers.is_empty() {
            return Err(ControllerError::EmptyLayerList);
        }

        let mut controller = Self {
            last_position: sensors.encoder_position(),
            encoder_switch_level: sensors.encoder_switch_level(),
            stick_switch_level: sensors.stick_switch_level(),
            config,
            layer_index: 0,
            stick: StickState::default(),
        };

        indicator.set_brightness(controller.config.brightness);
        controller.activate_layer(indicator);
        Ok(controller)
    }

    /// Currently active layer index
    pub fn layer_index(&self) -> usize {
        self.layer_index
    }

    /// Currently active layer
    pub fn active_layer(&self) -> &LayerConfig {
        // Index invariant upheld by new() and the navigation methods
        &self.config.layers[self.layer_index]
    }

    /// Run one polling tick: encoder, then stick, then switches
    pub fn poll_tick<S: Sensors, H: HidSink, I: Indicator>(
        &mut self,
        sensors: &mut S,
        hid: &mut H,
        indicator: &mut I,
    ) {
        self.poll_encoder(sensors, hid, indicator);
        self.poll_stick(sensors, hid, indicator);
        self.poll_switches(sensors, indicator);
    }

    /// Advance to the next layer, wrapping from the last back to 0
    pub fn next_layer<I: Indicator>(&mut self, indicator: &mut I) {
        self.layer_index = (self.layer_index + 1) % self.config.layers.len();
        self.activate_layer(indicator);
    }

    /// Jump straight back to the first layer
    pub fn reset_to_first_layer<I: Indicator>(&mut self, indicator: &mut I) {
        self.layer_index = 0;
        self.activate_layer(indicator);
    }

    /// Apply the active layer's effects: pixel color and name report
    fn activate_layer<I: Indicator>(&mut self, indicator: &mut I) {
        let layer = &self.config.layers[self.layer_index];
        indicator.set_color(layer.color);
        #[cfg(feature = "defmt")]
        defmt::info!("Active layer: {}", layer.name.as_str());
    }

    /// Encoder step: one direction event per tick on any position change
    fn poll_encoder<S: Sensors, H: HidSink, I: Indicator>(
        &mut self,
        sensors: &mut S,
        hid: &mut H,
        indicator: &mut I,
    ) {
        let position = sensors.encoder_position();
        if position == self.last_position {
            return;
        }

        // Delta magnitude beyond one detent is not amplified
        let action = if position > self.last_position {
            self.active_layer().encoder_cw
        } else {
            self.active_layer().encoder_ccw
        };
        action.tap(hid);
        indicator.pulse();

        self.last_position = position;
    }

    /// Stick step: edge-triggered tilt transitions, level-triggered
    /// mouse movement
    fn poll_stick<S: Sensors, H: HidSink, I: Indicator>(
        &mut self,
        sensors: &mut S,
        hid: &mut H,
        indicator: &mut I,
    ) {
        let raw_x = sensors.stick_x();
        let raw_y = sensors.stick_y();

        match stick::read_displacement(raw_x, raw_y) {
            Some((dx, dy)) => {
                if !self.stick.tilted {
                    self.stick.tilted = true;
                    self.on_stick_move(dx, dy, hid);
                    indicator.pulse();
                }
                // Mouse layers track the stick every tick while tilted;
                // dpad layers hold their direction until the untilt edge.
                if self.active_layer().stick == StickMode::Mouse {
                    hid.pointer_move(
                        (dx / MOUSE_DIVISOR) as i8,
                        (dy / MOUSE_DIVISOR) as i8,
                    );
                }
            }
            None => {
                if self.stick.tilted {
                    self.stick.tilted = false;
                    self.on_stick_stop(hid);
                    indicator.pulse();
                }
            }
        }
    }

    /// Tilt-onset: in dpad mode, classify and press the direction
    fn on_stick_move<H: HidSink>(&mut self, dx: i32, dy: i32, hid: &mut H) {
        let StickMode::Dpad(actions) = self.active_layer().stick else {
            return;
        };

        let direction = stick::classify_direction(dx, dy);
        let action = match direction {
            Direction::Up => actions.up,
            Direction::Down => actions.down,
            Direction::Left => actions.left,
            Direction::Right => actions.right,
        };

        // Old direction out before the new one goes down
        if let Some((_, held)) = self.stick.held.take() {
            held.release(hid);
        }
        action.press(hid);
        self.stick.held = Some((direction, action));
    }

    /// Untilt edge: release whatever direction was held
    fn on_stick_stop<H: HidSink>(&mut self, hid: &mut H) {
        if let Some((_, held)) = self.stick.held.take() {
            held.release(hid);
        }
    }

    /// Button step: falling edges trigger layer navigation
    fn poll_switches<S: Sensors, I: Indicator>(&mut self, sensors: &mut S, indicator: &mut I) {
        let level = sensors.encoder_switch_level();
        if level != self.encoder_switch_level {
            self.encoder_switch_level = level;
            if !level {
                // Pressed (active-low)
                #[cfg(feature = "defmt")]
                defmt::debug!("Encoder switch pressed");
                self.next_layer(indicator);
                indicator.pulse();
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!("Encoder switch released");
            }
        }

        let level = sensors.stick_switch_level();
        if level != self.stick_switch_level {
            self.stick_switch_level = level;
            if !level {
                #[cfg(feature = "defmt")]
                defmt::debug!("Stick switch pressed");
                self.reset_to_first_layer(indicator);
                indicator.pulse();
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!("Stick switch released");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::DpadActions;
    use std::vec::Vec;

    // Raw sample that down-scales to zero displacement.
    const CENTER: u16 = 128 << 8;
    // Raw samples well past the deadzone on each side.
    const FAR_HIGH: u16 = (128 + 120) << 8;
    const FAR_LOW: u16 = (128 - 120) << 8;

    struct FakeSensors {
        encoder_switch: bool,
        stick_switch: bool,
        x: u16,
        y: u16,
        position: i32,
    }

    impl Default for FakeSensors {
        fn default() -> Self {
            // Switches idle high (pull-ups), stick centered.
            Self {
                encoder_switch: true,
                stick_switch: true,
                x: CENTER,
                y: CENTER,
                position: 0,
            }
        }
    }

    impl Sensors for FakeSensors {
        fn encoder_switch_level(&mut self) -> bool {
            self.encoder_switch
        }
        fn stick_switch_level(&mut self) -> bool {
            self.stick_switch
        }
        fn stick_x(&mut self) -> u16 {
            self.x
        }
        fn stick_y(&mut self) -> u16 {
            self.y
        }
        fn encoder_position(&mut self) -> i32 {
            self.position
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum HidEvent {
        KeyDown(u8),
        KeyUp(u8),
        ConsumerDown(u16),
        ConsumerUp(u16),
        PointerMove(i8, i8),
    }

    #[derive(Default)]
    struct FakeHid {
        events: Vec<HidEvent>,
    }

    impl HidSink for FakeHid {
        fn key_down(&mut self, code: u8) {
            self.events.push(HidEvent::KeyDown(code));
        }
        fn key_up(&mut self, code: u8) {
            self.events.push(HidEvent::KeyUp(code));
        }
        fn consumer_down(&mut self, usage: u16) {
            self.events.push(HidEvent::ConsumerDown(usage));
        }
        fn consumer_up(&mut self, usage: u16) {
            self.events.push(HidEvent::ConsumerUp(usage));
        }
        fn pointer_move(&mut self, dx: i8, dy: i8) {
            self.events.push(HidEvent::PointerMove(dx, dy));
        }
    }

    #[derive(Default)]
    struct FakeIndicator {
        colors: Vec<Rgb>,
        brightness: Vec<f32>,
        pulses: usize,
    }

    impl Indicator for FakeIndicator {
        fn set_color(&mut self, color: Rgb) {
            self.colors.push(color);
        }
        fn set_brightness(&mut self, brightness: f32) {
            self.brightness.push(brightness);
        }
        fn set_led(&mut self, _on: bool) {}
        fn pulse(&mut self) {
            self.pulses += 1;
        }
    }

    fn media_layer() -> LayerConfig {
        let mut layer = LayerConfig::default();
        layer.name = heapless::String::try_from("media").unwrap();
        layer.color = Rgb::new(255, 0, 0);
        layer.encoder_cw = KeyAction::Consumer(0xE9);
        layer.encoder_ccw = KeyAction::Consumer(0xEA);
        layer
    }

    fn arrows_layer() -> LayerConfig {
        let mut layer = LayerConfig::default();
        layer.name = heapless::String::try_from("arrows").unwrap();
        layer.color = Rgb::new(0, 0, 255);
        layer.stick = StickMode::Dpad(DpadActions {
            up: KeyAction::Key(0x52),
            down: KeyAction::Key(0x51),
            left: KeyAction::Key(0x50),
            right: KeyAction::Key(0x4F),
        });
        layer
    }

    fn config_of(layers: &[LayerConfig]) -> KnobConfig {
        let mut config = KnobConfig::new();
        config.brightness = 0.5;
        for layer in layers {
            config.layers.push(layer.clone()).unwrap();
        }
        config
    }

    struct Rig {
        controller: KnobController,
        sensors: FakeSensors,
        hid: FakeHid,
        indicator: FakeIndicator,
    }

    impl Rig {
        fn new(layers: &[LayerConfig]) -> Self {
            let mut sensors = FakeSensors::default();
            let mut indicator = FakeIndicator::default();
            let controller =
                KnobController::new(config_of(layers), &mut sensors, &mut indicator).unwrap();
            Self {
                controller,
                sensors,
                hid: FakeHid::default(),
                indicator,
            }
        }

        fn tick(&mut self) {
            self.controller
                .poll_tick(&mut self.sensors, &mut self.hid, &mut self.indicator);
        }

        /// Press and release a switch across two ticks
        fn click_encoder_switch(&mut self) {
            self.sensors.encoder_switch = false;
            self.tick();
            self.sensors.encoder_switch = true;
            self.tick();
        }

        fn click_stick_switch(&mut self) {
            self.sensors.stick_switch = false;
            self.tick();
            self.sensors.stick_switch = true;
            self.tick();
        }
    }

    #[test]
    fn test_empty_layer_list_rejected() {
        let mut sensors = FakeSensors::default();
        let mut indicator = FakeIndicator::default();
        let result = KnobController::new(KnobConfig::new(), &mut sensors, &mut indicator);
        assert!(matches!(result, Err(ControllerError::EmptyLayerList)));
        // Construction failed before any indicator effect
        assert!(indicator.colors.is_empty());
    }

    #[test]
    fn test_startup_activates_first_layer() {
        let rig = Rig::new(&[media_layer(), arrows_layer()]);
        assert_eq!(rig.controller.layer_index(), 0);
        assert_eq!(rig.indicator.brightness, [0.5]);
        assert_eq!(rig.indicator.colors, [Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.tick();
        rig.tick();
        assert!(rig.hid.events.is_empty());
        assert_eq!(rig.indicator.pulses, 0);
    }

    #[test]
    fn test_encoder_cw_taps_and_blinks() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.sensors.position += 1;
        rig.tick();
        assert_eq!(
            rig.hid.events,
            [HidEvent::ConsumerDown(0xE9), HidEvent::ConsumerUp(0xE9)]
        );
        assert_eq!(rig.indicator.pulses, 1);

        // No further motion, no further events
        rig.tick();
        assert_eq!(rig.hid.events.len(), 2);
    }

    #[test]
    fn test_encoder_ccw_taps() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.sensors.position -= 1;
        rig.tick();
        assert_eq!(
            rig.hid.events,
            [HidEvent::ConsumerDown(0xEA), HidEvent::ConsumerUp(0xEA)]
        );
    }

    #[test]
    fn test_fast_spin_is_one_event_per_tick() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.sensors.position += 5;
        rig.tick();
        // Delta of 5 detents still taps exactly once
        assert_eq!(rig.hid.events.len(), 2);
        assert_eq!(rig.indicator.pulses, 1);
    }

    #[test]
    fn test_layer_cycle_wraps() {
        let mut rig = Rig::new(&[media_layer(), arrows_layer()]);

        rig.click_encoder_switch();
        assert_eq!(rig.controller.layer_index(), 1);

        rig.click_encoder_switch();
        assert_eq!(rig.controller.layer_index(), 0);

        // Startup color, then one per activation
        assert_eq!(
            rig.indicator.colors,
            [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), Rgb::new(255, 0, 0)]
        );
        assert_eq!(rig.indicator.pulses, 2);
    }

    #[test]
    fn test_held_switch_fires_once() {
        let mut rig = Rig::new(&[media_layer(), arrows_layer()]);
        rig.sensors.encoder_switch = false;
        rig.tick();
        rig.tick();
        rig.tick();
        assert_eq!(rig.controller.layer_index(), 1);
        assert_eq!(rig.indicator.pulses, 1);
    }

    #[test]
    fn test_stick_switch_resets_to_first_layer() {
        let mut rig = Rig::new(&[media_layer(), arrows_layer()]);
        rig.click_encoder_switch();
        assert_eq!(rig.controller.layer_index(), 1);

        rig.click_stick_switch();
        assert_eq!(rig.controller.layer_index(), 0);
    }

    #[test]
    fn test_switch_already_pressed_at_startup() {
        let mut sensors = FakeSensors::default();
        sensors.encoder_switch = false;
        let mut indicator = FakeIndicator::default();
        let controller = KnobController::new(
            config_of(&[media_layer(), arrows_layer()]),
            &mut sensors,
            &mut indicator,
        )
        .unwrap();

        let mut rig = Rig {
            controller,
            sensors,
            hid: FakeHid::default(),
            indicator,
        };
        // Still held: the initial sample means no falling edge is seen
        rig.tick();
        assert_eq!(rig.controller.layer_index(), 0);
    }

    #[test]
    fn test_mouse_mode_moves_every_tick() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.sensors.x = FAR_HIGH; // dx = 120 -> 6 after the divisor

        rig.tick();
        rig.tick();
        assert_eq!(
            rig.hid.events,
            [HidEvent::PointerMove(6, 0), HidEvent::PointerMove(6, 0)]
        );
        // Tilt edge blinked exactly once
        assert_eq!(rig.indicator.pulses, 1);

        rig.sensors.x = CENTER;
        rig.tick();
        assert_eq!(rig.hid.events.len(), 2);
        // Untilt edge blinked too
        assert_eq!(rig.indicator.pulses, 2);
    }

    #[test]
    fn test_mouse_move_truncates_toward_zero() {
        let mut rig = Rig::new(&[media_layer()]);
        rig.sensors.x = FAR_LOW; // dx = -120 -> -6
        rig.sensors.y = (128 + 110) << 8; // dy = 110 -> 5

        rig.tick();
        assert_eq!(rig.hid.events, [HidEvent::PointerMove(-6, 5)]);
    }

    #[test]
    fn test_dpad_press_release_pairing() {
        let mut rig = Rig::new(&[arrows_layer()]);
        rig.sensors.y = FAR_LOW; // up

        rig.tick();
        assert_eq!(rig.hid.events, [HidEvent::KeyDown(0x52)]);

        // Held across ticks without repeating
        rig.tick();
        rig.tick();
        assert_eq!(rig.hid.events.len(), 1);

        rig.sensors.y = CENTER;
        rig.tick();
        assert_eq!(
            rig.hid.events,
            [HidEvent::KeyDown(0x52), HidEvent::KeyUp(0x52)]
        );
    }

    #[test]
    fn test_dpad_direction_locked_while_tilted() {
        let mut rig = Rig::new(&[arrows_layer()]);
        rig.sensors.y = FAR_LOW; // up
        rig.tick();

        // Sweep to the right without returning to center
        rig.sensors.y = CENTER;
        rig.sensors.x = FAR_HIGH;
        rig.tick();
        assert_eq!(rig.hid.events, [HidEvent::KeyDown(0x52)]);

        rig.sensors.x = CENTER;
        rig.tick();
        assert_eq!(
            rig.hid.events,
            [HidEvent::KeyDown(0x52), HidEvent::KeyUp(0x52)]
        );
    }

    #[test]
    fn test_dpad_release_survives_layer_switch() {
        let mut rig = Rig::new(&[arrows_layer(), media_layer()]);
        rig.sensors.y = FAR_LOW;
        rig.tick();
        assert_eq!(rig.hid.events, [HidEvent::KeyDown(0x52)]);

        // Switch layers while the direction is still held
        rig.click_encoder_switch();
        assert_eq!(rig.controller.layer_index(), 1);

        // Untilt on the mouse layer still releases the original key
        rig.sensors.y = CENTER;
        rig.tick();
        assert_eq!(rig.hid.events.last(), Some(&HidEvent::KeyUp(0x52)));
    }

    #[test]
    fn test_dpad_tick_emits_no_pointer_moves() {
        let mut rig = Rig::new(&[arrows_layer()]);
        rig.sensors.x = FAR_HIGH;
        rig.tick();
        rig.tick();
        assert!(rig
            .hid
            .events
            .iter()
            .all(|e| !matches!(e, HidEvent::PointerMove(..))));
    }
}
