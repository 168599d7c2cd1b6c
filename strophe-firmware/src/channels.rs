//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, MouseReport};

use strophe_core::color::Rgb;

/// Channel capacity for outgoing HID reports
const HID_CHANNEL_SIZE: usize = 16;

/// One outgoing HID report for the writer task
pub enum HidReport {
    Keyboard(KeyboardReport),
    Consumer(MediaKeyboardReport),
    Mouse(MouseReport),
}

/// HID reports from the poll loop to the USB writer task
pub static HID_CHANNEL: Channel<CriticalSectionRawMutex, HidReport, HID_CHANNEL_SIZE> =
    Channel::new();

/// Latest status pixel color, brightness already applied
pub static PIXEL_COLOR: Signal<CriticalSectionRawMutex, Rgb> = Signal::new();
