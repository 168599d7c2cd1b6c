//! Mappable key actions
//!
//! Config files refer to actions by name (`"volume_increment"`,
//! `"left_arrow"`, ...). Names resolve once at load time into a closed
//! [`KeyAction`] variant so the polling path never touches strings.

pub mod consumer;
pub mod keycode;

pub use consumer::consumer_usage;
pub use keycode::keyboard_usage;

use crate::traits::HidSink;

/// Errors that can occur when resolving an action name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    /// Name not found in the keyboard or consumer tables
    UnknownKeyName,
}

/// A single mappable action
///
/// Constructed from configuration and immutable afterwards. Holds no
/// hardware resources; pressing and releasing go through the injected
/// [`HidSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Do nothing (unbound slot)
    #[default]
    NoOp,
    /// Emit a keyboard HID usage
    Key(u8),
    /// Emit a consumer-control usage (media/system controls)
    Consumer(u16),
}

impl KeyAction {
    /// Resolve a configured action name
    ///
    /// `None` or an empty string is an unbound slot. Consumer names are
    /// checked before keyboard names; anything unresolvable fails here
    /// so a bad keymap surfaces at load time, not mid-use.
    pub fn from_name(name: Option<&str>) -> Result<Self, KeymapError> {
        let name = match name {
            None | Some("") => return Ok(KeyAction::NoOp),
            Some(name) => name,
        };

        if let Some(usage) = consumer_usage(name) {
            return Ok(KeyAction::Consumer(usage));
        }
        if let Some(usage) = keyboard_usage(name) {
            return Ok(KeyAction::Key(usage));
        }
        Err(KeymapError::UnknownKeyName)
    }

    /// Assert the action
    pub fn press<H: HidSink>(&self, hid: &mut H) {
        match *self {
            KeyAction::NoOp => {}
            KeyAction::Key(code) => hid.key_down(code),
            KeyAction::Consumer(usage) => hid.consumer_down(usage),
        }
    }

    /// Release the action
    pub fn release<H: HidSink>(&self, hid: &mut H) {
        match *self {
            KeyAction::NoOp => {}
            KeyAction::Key(code) => hid.key_up(code),
            KeyAction::Consumer(usage) => hid.consumer_up(usage),
        }
    }

    /// Press immediately followed by release
    ///
    /// Used for instantaneous events like encoder detents.
    pub fn tap<H: HidSink>(&self, hid: &mut H) {
        self.press(hid);
        self.release(hid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: std::vec::Vec<&'static str>,
        codes: std::vec::Vec<u16>,
    }

    impl HidSink for RecordingSink {
        fn key_down(&mut self, code: u8) {
            self.calls.push("key_down");
            self.codes.push(code as u16);
        }
        fn key_up(&mut self, code: u8) {
            self.calls.push("key_up");
            self.codes.push(code as u16);
        }
        fn consumer_down(&mut self, usage: u16) {
            self.calls.push("consumer_down");
            self.codes.push(usage);
        }
        fn consumer_up(&mut self, usage: u16) {
            self.calls.push("consumer_up");
            self.codes.push(usage);
        }
        fn pointer_move(&mut self, _dx: i8, _dy: i8) {
            self.calls.push("pointer_move");
        }
    }

    #[test]
    fn test_empty_name_is_noop() {
        assert_eq!(KeyAction::from_name(None), Ok(KeyAction::NoOp));
        assert_eq!(KeyAction::from_name(Some("")), Ok(KeyAction::NoOp));
    }

    #[test]
    fn test_consumer_name_resolves() {
        assert_eq!(
            KeyAction::from_name(Some("volume_increment")),
            Ok(KeyAction::Consumer(0xE9))
        );
        assert_eq!(
            KeyAction::from_name(Some("volume_decrement")),
            Ok(KeyAction::Consumer(0xEA))
        );
    }

    #[test]
    fn test_keyboard_name_resolves() {
        assert_eq!(KeyAction::from_name(Some("a")), Ok(KeyAction::Key(0x04)));
        assert_eq!(
            KeyAction::from_name(Some("up_arrow")),
            Ok(KeyAction::Key(0x52))
        );
    }

    #[test]
    fn test_unknown_name_fails() {
        assert_eq!(
            KeyAction::from_name(Some("warp_drive")),
            Err(KeymapError::UnknownKeyName)
        );
    }

    #[test]
    fn test_noop_emits_nothing() {
        let mut sink = RecordingSink::default();
        KeyAction::NoOp.press(&mut sink);
        KeyAction::NoOp.release(&mut sink);
        KeyAction::NoOp.tap(&mut sink);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_key_press_release() {
        let mut sink = RecordingSink::default();
        let action = KeyAction::Key(0x04);
        action.press(&mut sink);
        action.release(&mut sink);
        assert_eq!(sink.calls, ["key_down", "key_up"]);
        assert_eq!(sink.codes, [0x04, 0x04]);
    }

    #[test]
    fn test_consumer_tap_pairs_down_up() {
        let mut sink = RecordingSink::default();
        KeyAction::Consumer(0xE9).tap(&mut sink);
        assert_eq!(sink.calls, ["consumer_down", "consumer_up"]);
    }
}
