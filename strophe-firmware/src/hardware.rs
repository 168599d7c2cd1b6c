//! Board peripherals behind the strophe-core capability traits
//!
//! Pin assignments live in main.rs; this module adapts the concrete
//! RP2040 peripherals to the `Sensors` and `Indicator` traits the
//! controller polls.

use defmt::*;
use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{block_for, Duration};
use portable_atomic::Ordering;

use strophe_core::color::Rgb;
use strophe_core::traits::{Indicator, Sensors};

use crate::channels::PIXEL_COLOR;
use crate::tasks::ENCODER_POSITION;

/// ADC midpoint reported when a conversion fails, scaled to 16 bits
/// this reads as a centered stick
const ADC_CENTER: u16 = 2048;

/// Blink duration for input feedback
const PULSE_MS: u64 = 100;

/// Physical sensor inputs of the knob
pub struct KnobSensors {
    adc: Adc<'static, Blocking>,
    stick_x: adc::Channel<'static>,
    stick_y: adc::Channel<'static>,
    encoder_switch: Input<'static>,
    stick_switch: Input<'static>,
}

impl KnobSensors {
    pub fn new(
        adc: Adc<'static, Blocking>,
        stick_x: adc::Channel<'static>,
        stick_y: adc::Channel<'static>,
        encoder_switch: Input<'static>,
        stick_switch: Input<'static>,
    ) -> Self {
        Self {
            adc,
            stick_x,
            stick_y,
            encoder_switch,
            stick_switch,
        }
    }

    /// Read one ADC channel, widened from 12 to 16 bits
    fn read_axis(&mut self, which: Axis) -> u16 {
        let channel = match which {
            Axis::X => &mut self.stick_x,
            Axis::Y => &mut self.stick_y,
        };
        match self.adc.blocking_read(channel) {
            Ok(raw) => (raw << 4) | (raw >> 8),
            Err(_) => {
                warn!("ADC read failed, reporting centered axis");
                (ADC_CENTER << 4) | (ADC_CENTER >> 8)
            }
        }
    }
}

enum Axis {
    X,
    Y,
}

impl Sensors for KnobSensors {
    fn encoder_switch_level(&mut self) -> bool {
        self.encoder_switch.is_high()
    }

    fn stick_switch_level(&mut self) -> bool {
        self.stick_switch.is_high()
    }

    fn stick_x(&mut self) -> u16 {
        self.read_axis(Axis::X)
    }

    fn stick_y(&mut self) -> u16 {
        self.read_axis(Axis::Y)
    }

    fn encoder_position(&mut self) -> i32 {
        ENCODER_POSITION.load(Ordering::Relaxed)
    }
}

/// Status outputs: the WS2812 pixel (via the pixel task) and the
/// onboard LED
pub struct BoardIndicator {
    led: Output<'static>,
    color: Rgb,
    brightness: f32,
}

impl BoardIndicator {
    pub fn new(led: Output<'static>) -> Self {
        Self {
            led,
            color: Rgb::BLACK,
            brightness: 1.0,
        }
    }

    fn publish(&self) {
        PIXEL_COLOR.signal(self.color.scaled(self.brightness));
    }
}

impl Indicator for BoardIndicator {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.publish();
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
        self.publish();
    }

    fn set_led(&mut self, on: bool) {
        if on {
            self.led.set_high();
        } else {
            self.led.set_low();
        }
    }

    fn pulse(&mut self) {
        // Blocks the caller for the full blink; the poll loop is
        // suspended until this returns
        self.led.toggle();
        block_for(Duration::from_millis(PULSE_MS));
        self.led.toggle();
    }
}
