//! Consumer-control usage lookup
//!
//! Semantic media/system actions from the USB HID consumer page (0x0C).
//! These are distinct from keyboard usages and go out in their own
//! report.

/// Look up a consumer-control usage ID by name
pub fn consumer_usage(name: &str) -> Option<u16> {
    let usage = match name {
        "volume_increment" => 0xE9,
        "volume_decrement" => 0xEA,
        "mute" => 0xE2,
        "play_pause" => 0xCD,
        "scan_next_track" => 0xB5,
        "scan_previous_track" => 0xB6,
        "stop" => 0xB7,
        "record" => 0xB2,
        "fast_forward" => 0xB3,
        "rewind" => 0xB4,
        "eject" => 0xB8,
        "brightness_increment" => 0x6F,
        "brightness_decrement" => 0x70,
        _ => return None,
    };
    Some(usage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_pair() {
        assert_eq!(consumer_usage("volume_increment"), Some(0xE9));
        assert_eq!(consumer_usage("volume_decrement"), Some(0xEA));
    }

    #[test]
    fn test_transport_controls() {
        assert_eq!(consumer_usage("play_pause"), Some(0xCD));
        assert_eq!(consumer_usage("scan_next_track"), Some(0xB5));
    }

    #[test]
    fn test_keyboard_names_not_here() {
        assert_eq!(consumer_usage("a"), None);
        assert_eq!(consumer_usage("up_arrow"), None);
    }
}
