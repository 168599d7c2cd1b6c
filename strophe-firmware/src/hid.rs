//! HID sink backed by the USB report channel
//!
//! Maintains boot-keyboard state (modifier byte plus six keycode
//! slots) and turns each trait call into a full report on the channel.
//! Reports are dropped when the channel is full rather than stalling
//! the poll loop.

use defmt::*;
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, MouseReport};

use strophe_core::traits::HidSink;

use crate::channels::{HidReport, HID_CHANNEL};

/// Usage range of the keyboard modifier keys (LeftControl..RightGUI)
const MODIFIER_FIRST: u8 = 0xE0;
const MODIFIER_LAST: u8 = 0xE7;

pub struct UsbHidSink {
    modifier: u8,
    keycodes: [u8; 6],
}

impl UsbHidSink {
    pub fn new() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    fn send(&self, report: HidReport) {
        if HID_CHANNEL.try_send(report).is_err() {
            warn!("HID channel full, report dropped");
        }
    }

    fn send_keyboard(&self) {
        self.send(HidReport::Keyboard(KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }));
    }
}

impl HidSink for UsbHidSink {
    fn key_down(&mut self, usage: u8) {
        if (MODIFIER_FIRST..=MODIFIER_LAST).contains(&usage) {
            self.modifier |= 1 << (usage - MODIFIER_FIRST);
        } else if !self.keycodes.contains(&usage) {
            match self.keycodes.iter_mut().find(|slot| **slot == 0) {
                Some(slot) => *slot = usage,
                None => {
                    warn!("Keyboard rollover full, key {=u8:#x} dropped", usage);
                    return;
                }
            }
        }
        self.send_keyboard();
    }

    fn key_up(&mut self, usage: u8) {
        if (MODIFIER_FIRST..=MODIFIER_LAST).contains(&usage) {
            self.modifier &= !(1 << (usage - MODIFIER_FIRST));
        } else {
            for slot in self.keycodes.iter_mut() {
                if *slot == usage {
                    *slot = 0;
                }
            }
        }
        self.send_keyboard();
    }

    fn consumer_down(&mut self, usage: u16) {
        self.send(HidReport::Consumer(MediaKeyboardReport { usage_id: usage }));
    }

    fn consumer_up(&mut self, _usage: u16) {
        self.send(HidReport::Consumer(MediaKeyboardReport { usage_id: 0 }));
    }

    fn pointer_move(&mut self, dx: i8, dy: i8) {
        self.send(HidReport::Mouse(MouseReport {
            buttons: 0,
            x: dx,
            y: dy,
            wheel: 0,
            pan: 0,
        }));
    }
}
