//! Strophe - USB knob controller firmware
//!
//! Firmware binary for an RP2040-based desk knob: a rotary encoder, a
//! two-axis analog stick and two switches presented to the host as a
//! composite USB HID device (keyboard + consumer control + mouse).
//!
//! Named after the Greek "strophe", a turning.
//!
//! Pin map:
//!   GP13  encoder CLK
//!   GP14  encoder DT
//!   GP15  encoder push switch (active low)
//!   GP22  stick push switch (active low)
//!   GP25  onboard LED (blink feedback)
//!   GP23  WS2812 status pixel (layer color)
//!   GP26  stick Y axis (ADC0)
//!   GP27  stick X axis (ADC1)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::Builder;
use static_cell::StaticCell;
use usbd_hid::descriptor::{
    KeyboardReport, MediaKeyboardReport, MouseReport, SerializedDescriptor,
};
use {defmt_rtt as _, panic_probe as _};

use strophe_core::color::Rgb;
use strophe_core::config::{parse_config, KnobConfig, LayerConfig};

use crate::hardware::{BoardIndicator, KnobSensors};

/// Embedded default keymap (compiled into firmware)
/// Edit knob.toml and rebuild to customize
const EMBEDDED_KEYMAP: &str = include_str!("../knob.toml");

mod channels;
mod hardware;
mod hid;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Static cells for USB descriptor and class state (must live forever)
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 0]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
static CONSUMER_STATE: StaticCell<State> = StaticCell::new();
static MOUSE_STATE: StaticCell<State> = StaticCell::new();
static WS2812_PROGRAM: StaticCell<PioWs2812Program<'static, PIO0>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Strophe firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_keymap();
    info!("Keymap loaded: {} layers", config.layers.len());

    // Setup USB as a composite HID device
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = embassy_usb::Config::new(0x16c0, 0x27db);
    usb_config.manufacturer = Some("Strophe");
    usb_config.product = Some("Strophe Knob");
    usb_config.serial_number = Some("0001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([]),
        CONTROL_BUF.init([0; 64]),
    );

    let keyboard = HidWriter::<_, 8>::new(
        &mut builder,
        KEYBOARD_STATE.init(State::new()),
        HidConfig {
            report_descriptor: KeyboardReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 64,
        },
    );

    let consumer = HidWriter::<_, 2>::new(
        &mut builder,
        CONSUMER_STATE.init(State::new()),
        HidConfig {
            report_descriptor: MediaKeyboardReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 64,
        },
    );

    let mouse = HidWriter::<_, 5>::new(
        &mut builder,
        MOUSE_STATE.init(State::new()),
        HidConfig {
            report_descriptor: MouseReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 64,
        },
    );

    let usb_device = builder.build();
    info!("USB HID device built");

    // Setup PIO0 for the WS2812 status pixel
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);

    let program = WS2812_PROGRAM.init(PioWs2812Program::new(&mut common));
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_23, program);
    info!("Status pixel initialized");

    // Setup ADC for the analog stick (blocking reads from the poll loop)
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let stick_y = adc::Channel::new_pin(p.PIN_26, Pull::None);
    let stick_x = adc::Channel::new_pin(p.PIN_27, Pull::None);

    // Switches are active low with internal pull-ups
    let encoder_switch = Input::new(p.PIN_15, Pull::Up);
    let stick_switch = Input::new(p.PIN_22, Pull::Up);

    let sensors = KnobSensors::new(adc, stick_x, stick_y, encoder_switch, stick_switch);

    // Onboard LED for blink feedback
    let led = Output::new(p.PIN_25, Level::Low);
    let indicator = BoardIndicator::new(led);

    // Encoder quadrature inputs
    let encoder_clk = Input::new(p.PIN_13, Pull::Up);
    let encoder_dt = Input::new(p.PIN_14, Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::usb_task(usb_device)).unwrap();
    spawner
        .spawn(tasks::hid_writer_task(keyboard, consumer, mouse))
        .unwrap();
    spawner.spawn(tasks::pixel_task(ws2812)).unwrap();
    spawner
        .spawn(tasks::encoder_task(encoder_clk, encoder_dt))
        .unwrap();
    spawner
        .spawn(tasks::poll_task(config, sensors, indicator))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded keymap, falling back to a minimal single layer
/// if it does not parse
fn load_keymap() -> KnobConfig {
    match parse_config(EMBEDDED_KEYMAP) {
        Ok(config) => config,
        Err(e) => {
            // Should never happen if knob.toml is valid
            error!("Failed to parse embedded keymap: {}", e);
            error!("Using minimal fallback keymap");
            fallback_keymap()
        }
    }
}

/// Single white mouse-mode layer with no key bindings
fn fallback_keymap() -> KnobConfig {
    let mut config = KnobConfig::new();
    let mut layer = LayerConfig::default();
    layer.color = Rgb::new(255, 255, 255);
    // One layer always fits
    let _ = config.layers.push(layer);
    config
}
